//! SQLite-backed snapshot storage.
//!
//! The whole [`AppState`] is stored as one JSON document in a key-value
//! table under [`STATE_STORAGE_KEY`].

use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::rules::STATE_STORAGE_KEY;
use crate::state::AppState;

/// SQLite database holding the persisted snapshot.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/menagequest.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("menagequest.db"))
    }

    /// Open (or create) the database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key from the kv store. Returns whether it existed.
    pub fn kv_delete(&self, key: &str) -> Result<bool, rusqlite::Error> {
        let removed = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    /// Load the saved snapshot, or `None` if nothing was saved yet.
    ///
    /// A damaged snapshot is decoded leniently, field by field.
    pub fn load_state(&self) -> Result<Option<AppState>> {
        let Some(json) = self.kv_get(STATE_STORAGE_KEY)? else {
            tracing::debug!("no saved snapshot");
            return Ok(None);
        };
        Ok(Some(AppState::from_json_lenient(&json)))
    }

    /// Saved snapshot, or the initial state when none exists.
    pub fn load_state_or_default(&self) -> Result<AppState> {
        Ok(self.load_state()?.unwrap_or_default())
    }

    /// Persist the full snapshot, replacing the previous one.
    pub fn save_state(&self, state: &AppState) -> Result<()> {
        let json = state.to_json()?;
        self.kv_set(STATE_STORAGE_KEY, &json)?;
        tracing::debug!(bytes = json.len(), "snapshot saved");
        Ok(())
    }

    /// Forget the saved snapshot. Returns whether one existed.
    pub fn clear_state(&self) -> Result<bool> {
        let removed = self.kv_delete(STATE_STORAGE_KEY)?;
        tracing::info!(removed, "snapshot cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        assert!(db.kv_delete("test").unwrap());
        assert!(!db.kv_delete("test").unwrap());
    }

    #[test]
    fn empty_database_has_no_state() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_state().unwrap().is_none());
        assert_eq!(db.load_state_or_default().unwrap(), AppState::default());
    }

    #[test]
    fn save_then_load_state() {
        let db = Database::open_memory().unwrap();
        let mut state = AppState::default();
        state.complete_task("cellier", Utc.with_ymd_and_hms(2024, 7, 4, 9, 0, 0).unwrap());
        db.save_state(&state).unwrap();
        assert_eq!(db.load_state().unwrap(), Some(state));
    }

    #[test]
    fn clear_state_resets_to_default() {
        let db = Database::open_memory().unwrap();
        let mut state = AppState::default();
        state.complete_task("cave", Utc.with_ymd_and_hms(2024, 7, 4, 9, 0, 0).unwrap());
        db.save_state(&state).unwrap();

        assert!(db.clear_state().unwrap());
        assert_eq!(db.load_state_or_default().unwrap(), AppState::default());
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_defaults() {
        let db = Database::open_memory().unwrap();
        db.kv_set(STATE_STORAGE_KEY, "{\"userProfile\": 12}").unwrap();
        assert_eq!(db.load_state().unwrap(), Some(AppState::default()));
    }
}
