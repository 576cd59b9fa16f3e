use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::Identity;
use super::ids::Id;

/// A chosen-family group. Membership lives on `Identity::family_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: Id<Family>,
    pub name: String,
    pub created_by: Id<Identity>,
    pub created_at: DateTime<Utc>,
}

impl Family {
    pub fn create(name: String, created_by: Id<Identity>) -> Self {
        Self {
            id: Id::generate(),
            name,
            created_by,
            created_at: super::now(),
        }
    }
}
