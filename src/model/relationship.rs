use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::identity::Identity;
use super::ids::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStatus {
    Pending,
    Accepted,
    Rejected,
    Blocked,
}

impl RelationshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Pending => "pending",
            RelationshipStatus::Accepted => "accepted",
            RelationshipStatus::Rejected => "rejected",
            RelationshipStatus::Blocked => "blocked",
        }
    }

    /// Relationships are never deleted; these are the only moves allowed.
    pub fn can_become(&self, next: RelationshipStatus) -> bool {
        use RelationshipStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted) | (Pending, Rejected) | (Pending, Blocked) | (Accepted, Blocked)
        )
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RelationshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(RelationshipStatus::Pending),
            "accepted" => Ok(RelationshipStatus::Accepted),
            "rejected" => Ok(RelationshipStatus::Rejected),
            "blocked" => Ok(RelationshipStatus::Blocked),
            other => Err(format!("unknown relationship status '{}'", other)),
        }
    }
}

/// A directed connection request between two identities, labelled with
/// what the requester calls the other ("Sister", "Mentor").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: Id<Relationship>,
    pub from_id: Id<Identity>,
    pub to_id: Id<Identity>,
    pub label: String,
    pub status: RelationshipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Relationship {
    pub fn request(from_id: Id<Identity>, to_id: Id<Identity>, label: String) -> Self {
        let now = super::now();
        Self {
            id: Id::generate(),
            from_id,
            to_id,
            label,
            status: RelationshipStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// True iff this edge joins `a` and `b`, in either direction.
    pub fn joins(&self, a: Id<Identity>, b: Id<Identity>) -> bool {
        (self.from_id == a && self.to_id == b) || (self.from_id == b && self.to_id == a)
    }

    pub fn other_party(&self, id: Id<Identity>) -> Option<Id<Identity>> {
        if self.from_id == id {
            Some(self.to_id)
        } else if self.to_id == id {
            Some(self.from_id)
        } else {
            None
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == RelationshipStatus::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_is_pending() {
        let rel = Relationship::request(Id::generate(), Id::generate(), "Sister".into());
        assert_eq!(rel.status, RelationshipStatus::Pending);
        assert_eq!(rel.created_at, rel.updated_at);
    }

    #[test]
    fn joins_ignores_direction() {
        let (a, b, c) = (Id::generate(), Id::generate(), Id::generate());
        let rel = Relationship::request(a, b, "Mentor".into());
        assert!(rel.joins(a, b));
        assert!(rel.joins(b, a));
        assert!(!rel.joins(a, c));
    }

    #[test]
    fn other_party_from_either_end() {
        let (a, b) = (Id::generate(), Id::generate());
        let rel = Relationship::request(a, b, "Friend".into());
        assert_eq!(rel.other_party(a), Some(b));
        assert_eq!(rel.other_party(b), Some(a));
        assert_eq!(rel.other_party(Id::generate()), None);
    }

    #[test]
    fn allowed_transitions() {
        use RelationshipStatus::*;
        assert!(Pending.can_become(Accepted));
        assert!(Pending.can_become(Rejected));
        assert!(Pending.can_become(Blocked));
        assert!(Accepted.can_become(Blocked));
        assert!(!Accepted.can_become(Pending));
        assert!(!Rejected.can_become(Accepted));
        assert!(!Blocked.can_become(Accepted));
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in [
            RelationshipStatus::Pending,
            RelationshipStatus::Accepted,
            RelationshipStatus::Rejected,
            RelationshipStatus::Blocked,
        ] {
            assert_eq!(status.as_str().parse::<RelationshipStatus>().unwrap(), status);
        }
    }
}
