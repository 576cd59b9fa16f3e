use rusqlite::Connection;

use crate::error::KindredResult;

/// Initialize the database schema. Creates all tables if they don't exist.
pub fn initialize(conn: &Connection) -> KindredResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS identities (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            bio TEXT,
            location TEXT,
            website TEXT,
            birthday TEXT,
            family_id TEXT REFERENCES families(id),
            relationship_labels TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            UNIQUE(email COLLATE NOCASE)
        );

        CREATE TABLE IF NOT EXISTS privacy_policies (
            owner_id TEXT PRIMARY KEY NOT NULL REFERENCES identities(id) ON DELETE CASCADE,
            profile TEXT NOT NULL,
            posts TEXT NOT NULL,
            contact TEXT NOT NULL,
            bio TEXT NOT NULL,
            relationships TEXT NOT NULL,
            family TEXT NOT NULL,
            allow_messages_from_strangers INTEGER
        );

        CREATE TABLE IF NOT EXISTS relationships (
            id TEXT PRIMARY KEY NOT NULL,
            from_id TEXT NOT NULL REFERENCES identities(id),
            to_id TEXT NOT NULL REFERENCES identities(id),
            label TEXT NOT NULL,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS relationships_pair
            ON relationships (from_id, to_id, status);

        CREATE TABLE IF NOT EXISTS families (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            created_by TEXT NOT NULL REFERENCES identities(id),
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS posts (
            id TEXT PRIMARY KEY NOT NULL,
            author_id TEXT NOT NULL REFERENCES identities(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS posts_by_author
            ON posts (author_id, created_at DESC);

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory sqlite");
    initialize(&conn).expect("schema");
    conn
}
