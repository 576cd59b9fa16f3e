use rusqlite::Connection;
use tracing::{info, instrument};

use super::require_identity;
use crate::db::{identity_repo, relationship_repo};
use crate::error::{KindredError, KindredResult};
use crate::model::{self, Id, Identity, Relationship, RelationshipStatus};
use crate::validation;

/// Asks `to_id` to connect. A pair may hold at most one pending or accepted
/// record at a time; rejected requests may be retried, blocked pairs may not.
#[instrument(skip(conn))]
pub fn request(
    conn: &Connection,
    from_id: Id<Identity>,
    to_id: Id<Identity>,
    label: &str,
) -> KindredResult<Relationship> {
    if from_id == to_id {
        return Err(KindredError::CannotConnectSelf);
    }
    let label = validation::non_blank(label, "label")?;
    require_identity(conn, from_id)?;
    require_identity(conn, to_id)?;

    for existing in relationship_repo::find_between(conn, from_id, to_id)? {
        match existing.status {
            RelationshipStatus::Blocked => return Err(KindredError::RelationshipBlocked),
            RelationshipStatus::Pending | RelationshipStatus::Accepted => {
                return Err(KindredError::AlreadyExists {
                    entity_type: "Relationship".into(),
                    identifier: existing.id.to_string(),
                })
            }
            RelationshipStatus::Rejected => {}
        }
    }

    let rel = Relationship::request(from_id, to_id, label);
    relationship_repo::insert(conn, &rel)?;
    info!(relationship = %rel.id, "relationship requested");
    Ok(rel)
}

pub fn accept(
    conn: &Connection,
    actor: Id<Identity>,
    rel_id: Id<Relationship>,
) -> KindredResult<Relationship> {
    transition(conn, actor, rel_id, RelationshipStatus::Accepted)
}

pub fn reject(
    conn: &Connection,
    actor: Id<Identity>,
    rel_id: Id<Relationship>,
) -> KindredResult<Relationship> {
    transition(conn, actor, rel_id, RelationshipStatus::Rejected)
}

/// Recipients may block a pending request; either party may block an
/// accepted relationship.
pub fn block(
    conn: &Connection,
    actor: Id<Identity>,
    rel_id: Id<Relationship>,
) -> KindredResult<Relationship> {
    transition(conn, actor, rel_id, RelationshipStatus::Blocked)
}

#[instrument(skip(conn))]
fn transition(
    conn: &Connection,
    actor: Id<Identity>,
    rel_id: Id<Relationship>,
    next: RelationshipStatus,
) -> KindredResult<Relationship> {
    let mut rel = relationship_repo::find_by_id(conn, rel_id)?
        .ok_or_else(|| KindredError::not_found("Relationship", rel_id))?;

    let permitted = match rel.status {
        RelationshipStatus::Pending => actor == rel.to_id,
        _ => rel.other_party(actor).is_some(),
    };
    if !permitted {
        return Err(KindredError::NotPermitted {
            expected: "the recipient of the request".into(),
        });
    }

    if !rel.status.can_become(next) {
        return Err(KindredError::InvalidTransition {
            from: rel.status.to_string(),
            to: next.to_string(),
        });
    }

    let tx = conn.unchecked_transaction()?;
    rel.status = next;
    rel.updated_at = model::now();
    relationship_repo::update_status(&tx, &rel)?;
    refresh_labels(&tx, rel.from_id)?;
    refresh_labels(&tx, rel.to_id)?;
    tx.commit()?;

    info!(status = %next, "relationship updated");
    Ok(rel)
}

/// Rebuilds an identity's displayed relationship labels from its accepted
/// relationships, oldest first, without duplicates.
pub(crate) fn refresh_labels(conn: &Connection, id: Id<Identity>) -> KindredResult<()> {
    let mut identity = require_identity(conn, id)?;
    let mut labels: Vec<String> = Vec::new();
    for rel in relationship_repo::find_accepted_for(conn, id)? {
        if !labels.iter().any(|l| l.eq_ignore_ascii_case(&rel.label)) {
            labels.push(rel.label);
        }
    }

    if labels != identity.relationship_labels {
        identity.relationship_labels = labels;
        identity_repo::update(conn, &identity)?;
    }
    Ok(())
}
