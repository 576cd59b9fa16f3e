use chrono::NaiveDate;
use rusqlite::{params, Connection};

use super::{timestamp_from_sql, timestamp_to_sql};
use crate::error::{KindredError, KindredResult};
use crate::model::{Family, Id, Identity};

const COLUMNS: &str =
    "id, name, email, bio, location, website, birthday, family_id, relationship_labels, created_at";

pub fn insert(conn: &Connection, identity: &Identity) -> KindredResult<()> {
    conn.execute(
        "INSERT INTO identities (id, name, email, bio, location, website, birthday, family_id,
         relationship_labels, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            identity.id,
            identity.name,
            identity.email,
            identity.bio,
            identity.location,
            identity.website,
            identity.birthday.map(|d| d.to_string()),
            identity.family_id,
            serde_json::to_string(&identity.relationship_labels)?,
            timestamp_to_sql(&identity.created_at),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, identity: &Identity) -> KindredResult<()> {
    conn.execute(
        "UPDATE identities SET name = ?1, email = ?2, bio = ?3, location = ?4, website = ?5,
         birthday = ?6, family_id = ?7, relationship_labels = ?8
         WHERE id = ?9",
        params![
            identity.name,
            identity.email,
            identity.bio,
            identity.location,
            identity.website,
            identity.birthday.map(|d| d.to_string()),
            identity.family_id,
            serde_json::to_string(&identity.relationship_labels)?,
            identity.id,
        ],
    )?;
    Ok(())
}

pub fn set_family(
    conn: &Connection,
    id: Id<Identity>,
    family_id: Option<Id<Family>>,
) -> KindredResult<()> {
    conn.execute(
        "UPDATE identities SET family_id = ?1 WHERE id = ?2",
        params![family_id, id],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Identity>) -> KindredResult<Option<Identity>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM identities WHERE id = ?1", COLUMNS))?;

    let result = stmt.query_row(params![id], |row| Ok(row_to_identity(row)));

    match result {
        Ok(identity) => Ok(Some(identity?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_email(conn: &Connection, email: &str) -> KindredResult<Option<Identity>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM identities WHERE email = ?1 COLLATE NOCASE",
        COLUMNS
    ))?;

    let result = stmt.query_row(params![email], |row| Ok(row_to_identity(row)));

    match result {
        Ok(identity) => Ok(Some(identity?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_all(conn: &Connection) -> KindredResult<Vec<Identity>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM identities ORDER BY name", COLUMNS))?;

    let identities = stmt
        .query_map([], |row| Ok(row_to_identity(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(identities)
}

pub fn find_by_name(conn: &Connection, query: &str) -> KindredResult<Vec<Identity>> {
    let pattern = format!("%{}%", query.to_lowercase());
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM identities WHERE LOWER(name) LIKE ?1 ORDER BY name",
        COLUMNS
    ))?;

    let identities = stmt
        .query_map(params![pattern], |row| Ok(row_to_identity(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(identities)
}

pub fn find_by_family(conn: &Connection, family_id: Id<Family>) -> KindredResult<Vec<Identity>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM identities WHERE family_id = ?1 ORDER BY name",
        COLUMNS
    ))?;

    let identities = stmt
        .query_map(params![family_id], |row| Ok(row_to_identity(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(identities)
}

pub fn find_family_id(conn: &Connection, id: Id<Identity>) -> KindredResult<Option<Id<Family>>> {
    let result = conn.query_row(
        "SELECT family_id FROM identities WHERE id = ?1",
        params![id],
        |row| row.get::<_, Option<Id<Family>>>(0),
    );

    match result {
        Ok(family_id) => Ok(family_id),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn birthday_from_sql(s: &str) -> KindredResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| KindredError::Other(format!("Invalid birthday '{}': {}", s, e)))
}

fn row_to_identity(row: &rusqlite::Row) -> KindredResult<Identity> {
    let birthday_str: Option<String> = row.get(6)?;
    let labels_json: String = row.get(8)?;
    let created_at: String = row.get(9)?;

    Ok(Identity {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        bio: row.get(3)?,
        location: row.get(4)?,
        website: row.get(5)?,
        birthday: birthday_str.as_deref().map(birthday_from_sql).transpose()?,
        family_id: row.get(7)?,
        relationship_labels: serde_json::from_str(&labels_json)?,
        created_at: timestamp_from_sql(&created_at)?,
    })
}
