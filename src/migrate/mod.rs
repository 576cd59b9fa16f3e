//! Loads a document-database dump into a fresh SQLite store.
//!
//! The dump holds one JSON object per collection (`users`, `privacySettings`,
//! `families`, `relationships`, `posts`), each keyed by document id, with
//! camelCase fields. `privacySettings` is keyed by the owning user's id; older
//! dumps nest the same object inside each user instead, and when both exist
//! the collection entry wins field by field. Optional fields may be missing;
//! they are defaulted here once so the rest of the crate only sees typed
//! records.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use serde::Deserialize;
use tracing::{info, warn};

use crate::db::{family_repo, identity_repo, post_repo, privacy_repo, relationship_repo, schema};
use crate::error::{KindredError, KindredResult};
use crate::model::{self, Family, Id, Identity, Post, PrivacyLevel, PrivacyPolicy, Relationship};
use crate::ops::relationship_ops;
use crate::validation::trim_optional;

/// Imports a JSON dump file into the database at `db_path`.
pub fn import_json(json_path: &Path, db_path: &Path) -> KindredResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;

    let conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;

    import_documents(&conn, &json_str)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub identities: usize,
    pub policies: usize,
    pub families: usize,
    pub relationships: usize,
    pub posts: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Dump {
    users: BTreeMap<String, UserDoc>,
    #[serde(rename = "privacySettings")]
    privacy_settings: BTreeMap<String, PrivacyDoc>,
    families: BTreeMap<String, FamilyDoc>,
    relationships: BTreeMap<String, RelationshipDoc>,
    posts: BTreeMap<String, PostDoc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UserDoc {
    #[serde(alias = "name")]
    display_name: String,
    email: String,
    bio: Option<String>,
    location: Option<String>,
    website: Option<String>,
    birthday: Option<String>,
    family_id: Option<String>,
    created_at: Option<String>,
    privacy_settings: Option<PrivacyDoc>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PrivacyDoc {
    profile: Option<PrivacyLevel>,
    posts: Option<PrivacyLevel>,
    contact: Option<PrivacyLevel>,
    bio: Option<PrivacyLevel>,
    relationships: Option<PrivacyLevel>,
    family: Option<PrivacyLevel>,
    allow_messages_from_strangers: Option<bool>,
}

impl PrivacyDoc {
    /// Fields set in `newer` replace ours; unset ones keep ours.
    fn overlay(self, newer: &PrivacyDoc) -> PrivacyDoc {
        PrivacyDoc {
            profile: newer.profile.or(self.profile),
            posts: newer.posts.or(self.posts),
            contact: newer.contact.or(self.contact),
            bio: newer.bio.or(self.bio),
            relationships: newer.relationships.or(self.relationships),
            family: newer.family.or(self.family),
            allow_messages_from_strangers: newer
                .allow_messages_from_strangers
                .or(self.allow_messages_from_strangers),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FamilyDoc {
    name: String,
    created_by: String,
    created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RelationshipDoc {
    #[serde(alias = "fromUserId")]
    from_id: String,
    #[serde(alias = "toUserId")]
    to_id: String,
    #[serde(alias = "relationshipType")]
    label: String,
    status: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PostDoc {
    #[serde(alias = "userId")]
    author_id: String,
    content: String,
    created_at: Option<String>,
}

/// Imports an already-read dump into `conn` inside one transaction.
pub fn import_documents(conn: &Connection, json: &str) -> KindredResult<ImportStats> {
    let dump: Dump = serde_json::from_str(json)?;
    let mut stats = ImportStats::default();
    let tx = conn.unchecked_transaction()?;

    // Identities go in without a family first; families reference their
    // creator, so membership is applied once both exist.
    let mut memberships: Vec<(Id<Identity>, String)> = Vec::new();
    let mut settings: HashMap<Id<Identity>, PrivacyDoc> = HashMap::new();
    for (doc_id, doc) in &dump.users {
        let identity = parse_user(doc_id, doc)?;
        identity_repo::insert(&tx, &identity)?;
        if let Some(family) = doc.family_id.as_deref().filter(|f| !f.trim().is_empty()) {
            memberships.push((identity.id, family.to_string()));
        }
        if let Some(nested) = &doc.privacy_settings {
            settings.insert(identity.id, nested.clone());
        }
        stats.identities += 1;
    }

    for (owner_key, doc) in &dump.privacy_settings {
        let owner: Id<Identity> = parse_id(owner_key)?;
        if identity_repo::find_by_id(&tx, owner)?.is_none() {
            warn!(owner = %owner, "privacy settings of unknown user skipped");
            continue;
        }
        let merged = match settings.remove(&owner) {
            Some(nested) => nested.overlay(doc),
            None => doc.clone(),
        };
        settings.insert(owner, merged);
    }

    for (owner, doc) in &settings {
        privacy_repo::upsert(&tx, &parse_policy(*owner, doc))?;
        stats.policies += 1;
    }

    for (doc_id, doc) in &dump.families {
        let family = Family {
            id: parse_id(doc_id)?,
            name: doc.name.trim().to_string(),
            created_by: parse_id(&doc.created_by)?,
            created_at: parse_timestamp(doc.created_at.as_deref())?,
        };
        family_repo::insert(&tx, &family)?;
        stats.families += 1;
    }

    for (identity_id, family) in memberships {
        let family_id: Id<Family> = parse_id(&family)?;
        if family_repo::find_by_id(&tx, family_id)?.is_none() {
            warn!(identity = %identity_id, family = %family_id, "membership of unknown family skipped");
            continue;
        }
        identity_repo::set_family(&tx, identity_id, Some(family_id))?;
    }

    let mut touched: Vec<Id<Identity>> = Vec::new();
    for (doc_id, doc) in &dump.relationships {
        let created_at = parse_timestamp(doc.created_at.as_deref())?;
        let rel = Relationship {
            id: parse_id(doc_id)?,
            from_id: parse_id(&doc.from_id)?,
            to_id: parse_id(&doc.to_id)?,
            label: doc.label.trim().to_string(),
            status: match doc.status.as_deref() {
                Some(s) => s.parse().map_err(KindredError::Other)?,
                None => model::RelationshipStatus::Pending,
            },
            created_at,
            updated_at: match doc.updated_at.as_deref() {
                Some(raw) => parse_timestamp(Some(raw))?,
                None => created_at,
            },
        };
        relationship_repo::insert(&tx, &rel)?;
        touched.push(rel.from_id);
        touched.push(rel.to_id);
        stats.relationships += 1;
    }

    touched.sort_by_key(|id| id.value);
    touched.dedup();
    for id in touched {
        relationship_ops::refresh_labels(&tx, id)?;
    }

    for (doc_id, doc) in &dump.posts {
        let post = Post {
            id: parse_id(doc_id)?,
            author_id: parse_id(&doc.author_id)?,
            content: doc.content.clone(),
            created_at: parse_timestamp(doc.created_at.as_deref())?,
        };
        post_repo::insert(&tx, &post)?;
        stats.posts += 1;
    }

    tx.commit()?;
    info!(?stats, "import complete");
    Ok(stats)
}

fn parse_user(doc_id: &str, doc: &UserDoc) -> KindredResult<Identity> {
    let name = doc.display_name.trim();
    Ok(Identity {
        id: parse_id(doc_id)?,
        // Some early accounts never set a display name.
        name: if name.is_empty() {
            doc.email.split('@').next().unwrap_or_default().to_string()
        } else {
            name.to_string()
        },
        email: doc.email.trim().to_string(),
        bio: trim_optional(doc.bio.as_deref()),
        location: trim_optional(doc.location.as_deref()),
        website: trim_optional(doc.website.as_deref()),
        birthday: doc
            .birthday
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok()),
        family_id: None,
        relationship_labels: Vec::new(),
        created_at: parse_timestamp(doc.created_at.as_deref())?,
    })
}

fn parse_policy(owner_id: Id<Identity>, doc: &PrivacyDoc) -> PrivacyPolicy {
    let base = PrivacyPolicy::baseline(owner_id);
    PrivacyPolicy {
        owner_id,
        profile: doc.profile.unwrap_or(base.profile),
        posts: doc.posts.unwrap_or(base.posts),
        contact: doc.contact.unwrap_or(base.contact),
        bio: doc.bio.unwrap_or(base.bio),
        relationships: doc.relationships.unwrap_or(base.relationships),
        family: doc.family.unwrap_or(base.family),
        allow_messages_from_strangers: doc.allow_messages_from_strangers,
    }
}

fn parse_id<T>(s: &str) -> KindredResult<Id<T>> {
    Id::parse(s).map_err(|e| KindredError::Other(format!("Invalid UUID '{}': {}", s, e)))
}

fn parse_timestamp(s: Option<&str>) -> KindredResult<DateTime<Utc>> {
    match s {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| KindredError::Other(format!("Invalid timestamp '{}': {}", raw, e))),
        None => Ok(model::now()),
    }
}
