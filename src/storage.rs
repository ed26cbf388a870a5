use crate::dlog;
use crate::error::LedgerResult;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Key-value slots holding serialized state, one string value per key.
pub trait SlotStore {
    fn read(&self, key: &str) -> LedgerResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> LedgerResult<()>;
    fn remove(&mut self, key: &str) -> LedgerResult<()>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the slot database at `path`.
    pub fn open(path: &Path) -> LedgerResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened slot store");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> LedgerResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> LedgerResult<Self> {
        if !table_exists(&conn, "slots")? {
            dlog!("creating slots table");
        }
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS slots (
              key         TEXT PRIMARY KEY,
              value       TEXT NOT NULL,
              updated_at  TEXT NOT NULL
            );
            ",
        )?;
        Ok(Self { conn })
    }
}

impl SlotStore for SqliteStore {
    fn read(&self, key: &str) -> LedgerResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        self.conn.execute(
            r"
            INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE SET
              value = excluded.value,
              updated_at = excluded.updated_at
            ",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        dlog!("slot_write key={key} bytes={}", value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> LedgerResult<()> {
        let n = self.conn.execute("DELETE FROM slots WHERE key = ?1", [key])?;
        dlog!("slot_remove key={key} removed={n}");
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> LedgerResult<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemoryStore {
    fn read(&self, key: &str) -> LedgerResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> LedgerResult<()> {
        self.slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_store_overwrites_and_removes() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.read("workouts").unwrap(), None);

        store.write("workouts", "[1]").unwrap();
        store.write("workouts", "[2]").unwrap();
        assert_eq!(store.read("workouts").unwrap().as_deref(), Some("[2]"));

        store.remove("workouts").unwrap();
        assert_eq!(store.read("workouts").unwrap(), None);
        // Removing a missing slot is fine.
        store.remove("workouts").unwrap();
    }

    #[test]
    fn sqlite_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mapty.sqlite");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.write("workouts", "[]").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.read("workouts").unwrap().as_deref(), Some("[]"));
    }
}
