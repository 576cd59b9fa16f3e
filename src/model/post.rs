use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::Identity;
use super::ids::Id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id<Post>,
    pub author_id: Id<Identity>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn create(author_id: Id<Identity>, content: String) -> Self {
        Self {
            id: Id::generate(),
            author_id,
            content,
            created_at: super::now(),
        }
    }
}
