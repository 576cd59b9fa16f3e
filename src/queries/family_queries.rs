use rusqlite::Connection;

use crate::db::{family_repo, identity_repo};
use crate::error::KindredResult;
use crate::model::{Family, Id, Identity};

pub fn find_by_name(conn: &Connection, query: &str) -> KindredResult<Vec<Family>> {
    family_repo::find_by_name(conn, query.trim())
}

/// Members of `id`, sorted by name.
pub fn members(conn: &Connection, id: Id<Family>) -> KindredResult<Vec<Identity>> {
    identity_repo::find_by_family(conn, id)
}

pub fn family_of(conn: &Connection, id: Id<Identity>) -> KindredResult<Option<Family>> {
    match identity_repo::find_family_id(conn, id)? {
        Some(family_id) => family_repo::find_by_id(conn, family_id),
        None => Ok(None),
    }
}
