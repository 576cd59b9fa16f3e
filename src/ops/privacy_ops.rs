use rusqlite::Connection;
use tracing::{debug, info, instrument};

use super::require_identity;
use crate::db::privacy_repo;
use crate::error::KindredResult;
use crate::model::{Id, Identity, PrivacyCategory, PrivacyLevel, PrivacyPolicy};

/// The owner's policy, created with the baseline levels on first access.
pub fn policy_for(conn: &Connection, owner_id: Id<Identity>) -> KindredResult<PrivacyPolicy> {
    if let Some(policy) = privacy_repo::find_by_owner(conn, owner_id)? {
        return Ok(policy);
    }

    require_identity(conn, owner_id)?;
    let policy = PrivacyPolicy::baseline(owner_id);
    privacy_repo::upsert(conn, &policy)?;
    debug!(owner = %owner_id, "created baseline privacy policy");
    Ok(policy)
}

#[instrument(skip(conn))]
pub fn set_level(
    conn: &Connection,
    owner_id: Id<Identity>,
    category: PrivacyCategory,
    level: PrivacyLevel,
) -> KindredResult<PrivacyPolicy> {
    let mut policy = policy_for(conn, owner_id)?;
    policy.set_level(category, level);
    privacy_repo::upsert(conn, &policy)?;
    info!(%category, %level, "privacy level changed");
    Ok(policy)
}

#[instrument(skip(conn))]
pub fn set_allow_messages_from_strangers(
    conn: &Connection,
    owner_id: Id<Identity>,
    allow: Option<bool>,
) -> KindredResult<PrivacyPolicy> {
    let mut policy = policy_for(conn, owner_id)?;
    policy.allow_messages_from_strangers = allow;
    privacy_repo::upsert(conn, &policy)?;
    Ok(policy)
}
