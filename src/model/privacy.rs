use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::identity::Identity;
use super::ids::Id;

/// Minimum audience for a category of profile data, from widest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    Public,
    Relationships,
    Family,
    Private,
}

impl PrivacyLevel {
    pub const ALL: [PrivacyLevel; 4] = [
        PrivacyLevel::Public,
        PrivacyLevel::Relationships,
        PrivacyLevel::Family,
        PrivacyLevel::Private,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Public => "public",
            PrivacyLevel::Relationships => "relationships",
            PrivacyLevel::Family => "family",
            PrivacyLevel::Private => "private",
        }
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PrivacyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PrivacyLevel::ALL
            .into_iter()
            .find(|l| l.as_str() == lower)
            .ok_or_else(|| format!("unknown privacy level '{}'", s.trim()))
    }
}

/// The independently gated kinds of profile data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyCategory {
    Profile,
    Posts,
    Contact,
    Bio,
    Relationships,
    Family,
}

impl PrivacyCategory {
    pub const ALL: [PrivacyCategory; 6] = [
        PrivacyCategory::Profile,
        PrivacyCategory::Posts,
        PrivacyCategory::Contact,
        PrivacyCategory::Bio,
        PrivacyCategory::Relationships,
        PrivacyCategory::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyCategory::Profile => "profile",
            PrivacyCategory::Posts => "posts",
            PrivacyCategory::Contact => "contact",
            PrivacyCategory::Bio => "bio",
            PrivacyCategory::Relationships => "relationships",
            PrivacyCategory::Family => "family",
        }
    }
}

impl fmt::Display for PrivacyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PrivacyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PrivacyCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("unknown privacy category '{}'", s.trim()))
    }
}

/// Per-category visibility settings owned by one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyPolicy {
    pub owner_id: Id<Identity>,
    pub profile: PrivacyLevel,
    pub posts: PrivacyLevel,
    pub contact: PrivacyLevel,
    pub bio: PrivacyLevel,
    pub relationships: PrivacyLevel,
    pub family: PrivacyLevel,
    /// `None` means the owner never said; only `Some(false)` blocks strangers.
    pub allow_messages_from_strangers: Option<bool>,
}

impl PrivacyPolicy {
    /// Settings used for identities that never saved a policy.
    pub fn baseline(owner_id: Id<Identity>) -> Self {
        Self {
            owner_id,
            profile: PrivacyLevel::Public,
            posts: PrivacyLevel::Relationships,
            contact: PrivacyLevel::Public,
            bio: PrivacyLevel::Public,
            relationships: PrivacyLevel::Relationships,
            family: PrivacyLevel::Family,
            allow_messages_from_strangers: None,
        }
    }

    pub fn level(&self, category: PrivacyCategory) -> PrivacyLevel {
        match category {
            PrivacyCategory::Profile => self.profile,
            PrivacyCategory::Posts => self.posts,
            PrivacyCategory::Contact => self.contact,
            PrivacyCategory::Bio => self.bio,
            PrivacyCategory::Relationships => self.relationships,
            PrivacyCategory::Family => self.family,
        }
    }

    pub fn set_level(&mut self, category: PrivacyCategory, level: PrivacyLevel) {
        let slot = match category {
            PrivacyCategory::Profile => &mut self.profile,
            PrivacyCategory::Posts => &mut self.posts,
            PrivacyCategory::Contact => &mut self.contact,
            PrivacyCategory::Bio => &mut self.bio,
            PrivacyCategory::Relationships => &mut self.relationships,
            PrivacyCategory::Family => &mut self.family,
        };
        *slot = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_levels() {
        let policy = PrivacyPolicy::baseline(Id::generate());
        assert_eq!(policy.level(PrivacyCategory::Profile), PrivacyLevel::Public);
        assert_eq!(policy.level(PrivacyCategory::Posts), PrivacyLevel::Relationships);
        assert_eq!(policy.level(PrivacyCategory::Contact), PrivacyLevel::Public);
        assert_eq!(policy.level(PrivacyCategory::Bio), PrivacyLevel::Public);
        assert_eq!(
            policy.level(PrivacyCategory::Relationships),
            PrivacyLevel::Relationships
        );
        assert_eq!(policy.level(PrivacyCategory::Family), PrivacyLevel::Family);
        assert_eq!(policy.allow_messages_from_strangers, None);
    }

    #[test]
    fn levels_are_ordered_widest_first() {
        assert!(PrivacyLevel::Public < PrivacyLevel::Relationships);
        assert!(PrivacyLevel::Relationships < PrivacyLevel::Family);
        assert!(PrivacyLevel::Family < PrivacyLevel::Private);
    }

    #[test]
    fn set_level_touches_one_category() {
        let mut policy = PrivacyPolicy::baseline(Id::generate());
        policy.set_level(PrivacyCategory::Bio, PrivacyLevel::Private);
        assert_eq!(policy.bio, PrivacyLevel::Private);
        assert_eq!(policy.profile, PrivacyLevel::Public);
        assert_eq!(policy.contact, PrivacyLevel::Public);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Family ".parse::<PrivacyLevel>().unwrap(), PrivacyLevel::Family);
        assert_eq!("POSTS".parse::<PrivacyCategory>().unwrap(), PrivacyCategory::Posts);
        assert!("friends".parse::<PrivacyLevel>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&PrivacyLevel::Relationships).unwrap();
        assert_eq!(json, "\"relationships\"");
    }
}
