use std::collections::HashSet;

use rusqlite::Connection;

use crate::access::{self, SqliteLookups};
use crate::db::post_repo;
use crate::error::KindredResult;
use crate::model::{Id, Identity, Post};
use crate::queries::relationship_queries;

/// Newest-first posts from the viewer and every identity whose posts the
/// viewer is allowed to see among its connections.
pub fn feed_for(conn: &Connection, viewer: Id<Identity>, limit: usize) -> KindredResult<Vec<Post>> {
    let lookups = SqliteLookups::new(conn);
    let mut feed = post_repo::find_by_author(conn, viewer, Some(limit))?;

    let mut seen = HashSet::new();
    for rel in relationship_queries::accepted_for(conn, viewer)? {
        let Some(author) = rel.other_party(viewer) else {
            continue;
        };
        if !seen.insert(author) {
            continue;
        }
        let ctx = access::evaluate(&lookups, Some(viewer), author)?;
        if ctx.can_view_posts {
            let posts = post_repo::find_by_author(conn, author, Some(limit))?;
            feed.extend(access::filter_posts(posts, &ctx));
        }
    }

    feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    feed.truncate(limit);
    Ok(feed)
}
