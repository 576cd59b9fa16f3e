use rusqlite::{params, Connection};

use super::{timestamp_from_sql, timestamp_to_sql};
use crate::error::KindredResult;
use crate::model::{Id, Identity, Post};

pub fn insert(conn: &Connection, post: &Post) -> KindredResult<()> {
    conn.execute(
        "INSERT INTO posts (id, author_id, content, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            post.id,
            post.author_id,
            post.content,
            timestamp_to_sql(&post.created_at),
        ],
    )?;
    Ok(())
}

/// Posts by `author_id`, newest first. `limit` of `None` returns them all.
pub fn find_by_author(
    conn: &Connection,
    author_id: Id<Identity>,
    limit: Option<usize>,
) -> KindredResult<Vec<Post>> {
    // SQLite treats a negative LIMIT as "no limit".
    let limit = limit.map(|n| n as i64).unwrap_or(-1);
    let mut stmt = conn.prepare(
        "SELECT id, author_id, content, created_at FROM posts
         WHERE author_id = ?1 ORDER BY created_at DESC, id LIMIT ?2",
    )?;

    let posts = stmt
        .query_map(params![author_id, limit], |row| Ok(row_to_post(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(posts)
}

fn row_to_post(row: &rusqlite::Row) -> KindredResult<Post> {
    let created_at: String = row.get(3)?;
    Ok(Post {
        id: row.get(0)?,
        author_id: row.get(1)?,
        content: row.get(2)?,
        created_at: timestamp_from_sql(&created_at)?,
    })
}
