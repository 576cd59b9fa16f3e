use rusqlite::{params, Connection};

use super::{timestamp_from_sql, timestamp_to_sql};
use crate::error::{KindredError, KindredResult};
use crate::model::{Id, Identity, Relationship, RelationshipStatus};

const COLUMNS: &str = "id, from_id, to_id, label, status, created_at, updated_at";

pub fn insert(conn: &Connection, rel: &Relationship) -> KindredResult<()> {
    conn.execute(
        "INSERT INTO relationships (id, from_id, to_id, label, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rel.id,
            rel.from_id,
            rel.to_id,
            rel.label,
            rel.status.as_str(),
            timestamp_to_sql(&rel.created_at),
            timestamp_to_sql(&rel.updated_at),
        ],
    )?;
    Ok(())
}

pub fn update_status(conn: &Connection, rel: &Relationship) -> KindredResult<()> {
    conn.execute(
        "UPDATE relationships SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![rel.status.as_str(), timestamp_to_sql(&rel.updated_at), rel.id],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Relationship>) -> KindredResult<Option<Relationship>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM relationships WHERE id = ?1", COLUMNS))?;

    let result = stmt.query_row(params![id], |row| Ok(row_to_relationship(row)));

    match result {
        Ok(rel) => Ok(Some(rel?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The oldest accepted relationship joining `a` and `b`, in either direction.
pub fn find_accepted_between(
    conn: &Connection,
    a: Id<Identity>,
    b: Id<Identity>,
) -> KindredResult<Option<Relationship>> {
    Ok(find_between(conn, a, b)?
        .into_iter()
        .find(|rel| rel.status == RelationshipStatus::Accepted))
}

/// Every relationship record joining `a` and `b`, oldest first.
pub fn find_between(
    conn: &Connection,
    a: Id<Identity>,
    b: Id<Identity>,
) -> KindredResult<Vec<Relationship>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM relationships
         WHERE (from_id = ?1 AND to_id = ?2) OR (from_id = ?2 AND to_id = ?1)
         ORDER BY created_at, id",
        COLUMNS
    ))?;

    let rels = stmt
        .query_map(params![a, b], |row| Ok(row_to_relationship(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rels)
}

/// Requests waiting on `recipient`, oldest first.
pub fn find_pending_for(
    conn: &Connection,
    recipient: Id<Identity>,
) -> KindredResult<Vec<Relationship>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM relationships WHERE to_id = ?1 AND status = 'pending'
         ORDER BY created_at",
        COLUMNS
    ))?;

    let rels = stmt
        .query_map(params![recipient], |row| Ok(row_to_relationship(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rels)
}

pub fn find_accepted_for(
    conn: &Connection,
    id: Id<Identity>,
) -> KindredResult<Vec<Relationship>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM relationships
         WHERE (from_id = ?1 OR to_id = ?1) AND status = 'accepted'
         ORDER BY created_at",
        COLUMNS
    ))?;

    let rels = stmt
        .query_map(params![id], |row| Ok(row_to_relationship(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rels)
}

fn row_to_relationship(row: &rusqlite::Row) -> KindredResult<Relationship> {
    let status: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(Relationship {
        id: row.get(0)?,
        from_id: row.get(1)?,
        to_id: row.get(2)?,
        label: row.get(3)?,
        status: status.parse().map_err(KindredError::Other)?,
        created_at: timestamp_from_sql(&created_at)?,
        updated_at: timestamp_from_sql(&updated_at)?,
    })
}
