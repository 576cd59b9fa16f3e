use rusqlite::Connection;
use tracing::{info, instrument};

use super::require_identity;
use crate::db::{family_repo, identity_repo};
use crate::error::{KindredError, KindredResult};
use crate::model::{Family, Id, Identity};
use crate::validation;

/// Creates a family and makes its creator the first member.
#[instrument(skip(conn))]
pub fn create_family(conn: &Connection, owner_id: Id<Identity>, name: &str) -> KindredResult<Family> {
    let name = validation::non_blank(name, "name")?;
    let owner = require_identity(conn, owner_id)?;
    if let Some(current) = owner.family_id {
        return Err(KindredError::AlreadyExists {
            entity_type: "Family membership".into(),
            identifier: current.to_string(),
        });
    }

    let family = Family::create(name, owner_id);
    let tx = conn.unchecked_transaction()?;
    family_repo::insert(&tx, &family)?;
    identity_repo::set_family(&tx, owner_id, Some(family.id))?;
    tx.commit()?;

    info!(family = %family.id, "family created");
    Ok(family)
}

/// Joins `family_id`. An identity belongs to at most one family, so a member
/// of another family must leave it first. Joining the current family again
/// is a no-op.
#[instrument(skip(conn))]
pub fn join_family(
    conn: &Connection,
    id: Id<Identity>,
    family_id: Id<Family>,
) -> KindredResult<Identity> {
    let mut identity = require_identity(conn, id)?;
    family_repo::find_by_id(conn, family_id)?
        .ok_or_else(|| KindredError::not_found("Family", family_id))?;

    match identity.family_id {
        Some(current) if current == family_id => return Ok(identity),
        Some(current) => {
            return Err(KindredError::AlreadyExists {
                entity_type: "Family membership".into(),
                identifier: current.to_string(),
            })
        }
        None => {}
    }

    identity_repo::set_family(conn, id, Some(family_id))?;
    identity.family_id = Some(family_id);
    info!(family = %family_id, "joined family");
    Ok(identity)
}

#[instrument(skip(conn))]
pub fn leave_family(conn: &Connection, id: Id<Identity>) -> KindredResult<Identity> {
    let mut identity = require_identity(conn, id)?;
    if identity.family_id.take().is_some() {
        identity_repo::set_family(conn, id, None)?;
        info!("left family");
    }
    Ok(identity)
}
