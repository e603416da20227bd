//! Local fallback snapshot storage.
//!
//! # Responsibility
//! - Persist whole-collection JSON documents under a named key.
//! - Keep SQL details inside the snapshot persistence boundary.
//!
//! # Invariants
//! - `save` replaces the previous value for the key in one statement.
//! - The snapshot is a backup copy, never the source of truth.

use crate::repo::designer_repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Key/value contract for the local snapshot.
pub trait SnapshotStore {
    fn load(&self, key: &str) -> RepoResult<Option<String>>;
    fn save(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed snapshot store.
pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO snapshots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
