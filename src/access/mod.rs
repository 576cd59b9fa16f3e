//! Privacy-scoped access to another identity's profile.
//!
//! [`evaluator::evaluate`] decides, per [`PrivacyCategory`](crate::model::PrivacyCategory),
//! what a viewer may see of a target; [`redactor`] applies that decision to
//! the target's identity record and posts.

pub mod lookup;
pub mod evaluator;
pub mod redactor;

pub use evaluator::{evaluate, evaluate_with_target, ViewContext};
pub use lookup::{ProfileLookups, SqliteLookups};
pub use redactor::{filter_posts, redact_identity};
