use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::family::Family;
use super::ids::Id;

/// A member of the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Id<Identity>,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub family_id: Option<Id<Family>>,
    /// Labels of this identity's accepted relationships ("Sister", "Mentor").
    pub relationship_labels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn create(name: String, email: String) -> Self {
        Self {
            id: Id::generate(),
            name,
            email,
            bio: None,
            location: None,
            website: None,
            birthday: None,
            family_id: None,
            relationship_labels: Vec::new(),
            created_at: super::now(),
        }
    }

    /// True iff this identity belongs to `family`. No family never matches,
    /// not even another identity without one.
    pub fn in_family(&self, family: Option<Id<Family>>) -> bool {
        matches!((self.family_id, family), (Some(a), Some(b)) if a == b)
    }
}
