pub mod identity_ops;
pub mod privacy_ops;
pub mod relationship_ops;
pub mod family_ops;
pub mod post_ops;

use rusqlite::Connection;

use crate::db::identity_repo;
use crate::error::{KindredError, KindredResult};
use crate::model::{Id, Identity};

pub(crate) fn require_identity(conn: &Connection, id: Id<Identity>) -> KindredResult<Identity> {
    identity_repo::find_by_id(conn, id)?.ok_or_else(|| KindredError::not_found("Identity", id))
}
