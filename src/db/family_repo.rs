use rusqlite::{params, Connection};

use super::{timestamp_from_sql, timestamp_to_sql};
use crate::error::KindredResult;
use crate::model::{Family, Id};

pub fn insert(conn: &Connection, family: &Family) -> KindredResult<()> {
    conn.execute(
        "INSERT INTO families (id, name, created_by, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            family.id,
            family.name,
            family.created_by,
            timestamp_to_sql(&family.created_at),
        ],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Family>) -> KindredResult<Option<Family>> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_by, created_at FROM families WHERE id = ?1")?;

    let result = stmt.query_row(params![id], |row| Ok(row_to_family(row)));

    match result {
        Ok(family) => Ok(Some(family?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_name(conn: &Connection, query: &str) -> KindredResult<Vec<Family>> {
    let pattern = format!("%{}%", query.to_lowercase());
    let mut stmt = conn.prepare(
        "SELECT id, name, created_by, created_at FROM families
         WHERE LOWER(name) LIKE ?1 ORDER BY name",
    )?;

    let families = stmt
        .query_map(params![pattern], |row| Ok(row_to_family(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(families)
}

fn row_to_family(row: &rusqlite::Row) -> KindredResult<Family> {
    let created_at: String = row.get(3)?;
    Ok(Family {
        id: row.get(0)?,
        name: row.get(1)?,
        created_by: row.get(2)?,
        created_at: timestamp_from_sql(&created_at)?,
    })
}
