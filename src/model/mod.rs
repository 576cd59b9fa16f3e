pub mod ids;
pub mod identity;
pub mod privacy;
pub mod relationship;
pub mod family;
pub mod post;

pub use ids::Id;
pub use identity::Identity;
pub use privacy::{PrivacyCategory, PrivacyLevel, PrivacyPolicy};
pub use relationship::{Relationship, RelationshipStatus};
pub use family::Family;
pub use post::Post;

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the precision the database keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
