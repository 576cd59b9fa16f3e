use rusqlite::Connection;
use tracing::{info, instrument};

use super::require_identity;
use crate::db::post_repo;
use crate::error::KindredResult;
use crate::model::{Id, Identity, Post};
use crate::validation;

#[instrument(skip(conn, content))]
pub fn create_post(conn: &Connection, author_id: Id<Identity>, content: &str) -> KindredResult<Post> {
    require_identity(conn, author_id)?;
    let content = validation::non_blank(content, "content")?;

    let post = Post::create(author_id, content);
    post_repo::insert(conn, &post)?;
    info!(post = %post.id, "post created");
    Ok(post)
}
