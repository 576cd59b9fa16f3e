use rusqlite::{params, Connection};

use crate::error::{KindredError, KindredResult};
use crate::model::{Id, Identity, PrivacyLevel, PrivacyPolicy};

pub fn upsert(conn: &Connection, policy: &PrivacyPolicy) -> KindredResult<()> {
    conn.execute(
        "INSERT INTO privacy_policies (owner_id, profile, posts, contact, bio, relationships, family,
         allow_messages_from_strangers)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(owner_id) DO UPDATE SET
            profile = excluded.profile,
            posts = excluded.posts,
            contact = excluded.contact,
            bio = excluded.bio,
            relationships = excluded.relationships,
            family = excluded.family,
            allow_messages_from_strangers = excluded.allow_messages_from_strangers",
        params![
            policy.owner_id,
            policy.profile.as_str(),
            policy.posts.as_str(),
            policy.contact.as_str(),
            policy.bio.as_str(),
            policy.relationships.as_str(),
            policy.family.as_str(),
            policy.allow_messages_from_strangers,
        ],
    )?;
    Ok(())
}

pub fn find_by_owner(
    conn: &Connection,
    owner_id: Id<Identity>,
) -> KindredResult<Option<PrivacyPolicy>> {
    let mut stmt = conn.prepare(
        "SELECT owner_id, profile, posts, contact, bio, relationships, family,
         allow_messages_from_strangers
         FROM privacy_policies WHERE owner_id = ?1",
    )?;

    let result = stmt.query_row(params![owner_id], |row| Ok(row_to_policy(row)));

    match result {
        Ok(policy) => Ok(Some(policy?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn row_to_policy(row: &rusqlite::Row) -> KindredResult<PrivacyPolicy> {
    let level = |idx: usize| -> KindredResult<PrivacyLevel> {
        let raw: String = row.get(idx)?;
        raw.parse().map_err(KindredError::Other)
    };

    Ok(PrivacyPolicy {
        owner_id: row.get(0)?,
        profile: level(1)?,
        posts: level(2)?,
        contact: level(3)?,
        bio: level(4)?,
        relationships: level(5)?,
        family: level(6)?,
        allow_messages_from_strangers: row.get(7)?,
    })
}
