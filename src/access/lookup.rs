use rusqlite::Connection;

use crate::db::{identity_repo, post_repo, privacy_repo, relationship_repo};
use crate::error::KindredResult;
use crate::model::{Family, Id, Identity, Post, PrivacyPolicy, Relationship};

/// Read capabilities the access evaluator depends on.
///
/// `Ok(None)` means "no such record"; `Err` means the lookup itself failed
/// and must never be read as a denial.
pub trait ProfileLookups {
    fn get_identity(&self, id: Id<Identity>) -> KindredResult<Option<Identity>>;

    fn get_privacy_policy(&self, id: Id<Identity>) -> KindredResult<Option<PrivacyPolicy>>;

    /// An accepted relationship joining `a` and `b` in either direction.
    /// When several exist the oldest is returned.
    fn find_accepted_relationship(
        &self,
        a: Id<Identity>,
        b: Id<Identity>,
    ) -> KindredResult<Option<Relationship>>;

    fn get_family_group(&self, id: Id<Identity>) -> KindredResult<Option<Id<Family>>>;

    /// Posts owned by `id`, newest first.
    fn list_posts_by_owner(
        &self,
        id: Id<Identity>,
        limit: Option<usize>,
    ) -> KindredResult<Vec<Post>>;
}

/// [`ProfileLookups`] backed by the local SQLite store.
pub struct SqliteLookups<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteLookups<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl ProfileLookups for SqliteLookups<'_> {
    fn get_identity(&self, id: Id<Identity>) -> KindredResult<Option<Identity>> {
        identity_repo::find_by_id(self.conn, id)
    }

    fn get_privacy_policy(&self, id: Id<Identity>) -> KindredResult<Option<PrivacyPolicy>> {
        privacy_repo::find_by_owner(self.conn, id)
    }

    fn find_accepted_relationship(
        &self,
        a: Id<Identity>,
        b: Id<Identity>,
    ) -> KindredResult<Option<Relationship>> {
        relationship_repo::find_accepted_between(self.conn, a, b)
    }

    fn get_family_group(&self, id: Id<Identity>) -> KindredResult<Option<Id<Family>>> {
        identity_repo::find_family_id(self.conn, id)
    }

    fn list_posts_by_owner(
        &self,
        id: Id<Identity>,
        limit: Option<usize>,
    ) -> KindredResult<Vec<Post>> {
        post_repo::find_by_author(self.conn, id, limit)
    }
}
