use rusqlite::Connection;

use crate::db::identity_repo;
use crate::error::KindredResult;
use crate::model::{Id, Identity};

pub fn all_identities(conn: &Connection) -> KindredResult<Vec<Identity>> {
    identity_repo::find_all(conn)
}

pub fn get_identity(conn: &Connection, id: Id<Identity>) -> KindredResult<Option<Identity>> {
    identity_repo::find_by_id(conn, id)
}

pub fn find_by_email(conn: &Connection, email: &str) -> KindredResult<Option<Identity>> {
    identity_repo::find_by_email(conn, email.trim())
}

pub fn find_by_name(conn: &Connection, query: &str) -> KindredResult<Vec<Identity>> {
    identity_repo::find_by_name(conn, query.trim())
}
