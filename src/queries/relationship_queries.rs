use rusqlite::Connection;

use crate::db::{identity_repo, relationship_repo};
use crate::error::KindredResult;
use crate::model::{Id, Identity, Relationship};

/// Requests waiting for `id` to answer.
pub fn pending_for(conn: &Connection, id: Id<Identity>) -> KindredResult<Vec<Relationship>> {
    relationship_repo::find_pending_for(conn, id)
}

pub fn accepted_for(conn: &Connection, id: Id<Identity>) -> KindredResult<Vec<Relationship>> {
    relationship_repo::find_accepted_for(conn, id)
}

/// The identities `id` is connected to, paired with the relationship label,
/// sorted by name.
pub fn connections_of(
    conn: &Connection,
    id: Id<Identity>,
) -> KindredResult<Vec<(Identity, String)>> {
    let mut connections = Vec::new();
    for rel in relationship_repo::find_accepted_for(conn, id)? {
        let Some(other) = rel.other_party(id) else {
            continue;
        };
        if let Some(identity) = identity_repo::find_by_id(conn, other)? {
            connections.push((identity, rel.label));
        }
    }

    connections.sort_by(|a, b| a.0.name.cmp(&b.0.name));
    Ok(connections)
}

/// Every record joining `a` and `b`, oldest first, whatever its status.
pub fn between(
    conn: &Connection,
    a: Id<Identity>,
    b: Id<Identity>,
) -> KindredResult<Vec<Relationship>> {
    relationship_repo::find_between(conn, a, b)
}
