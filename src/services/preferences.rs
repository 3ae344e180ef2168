use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Storage key for the chosen watchlist id
pub const WATCHLIST_PREFERENCE_KEY: &str = "hallplan_watchlist_id";

/// Persisted choice of watchlist, surviving restarts
pub trait PreferenceStore: Send + Sync {
    fn load_watchlist_id(&self) -> Result<Option<String>>;
    fn save_watchlist_id(&self, watchlist_id: &str) -> Result<()>;
    fn clear_watchlist_id(&self) -> Result<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn load_watchlist_id(&self) -> Result<Option<String>> {
        (**self).load_watchlist_id()
    }

    fn save_watchlist_id(&self, watchlist_id: &str) -> Result<()> {
        (**self).save_watchlist_id(watchlist_id)
    }

    fn clear_watchlist_id(&self) -> Result<()> {
        (**self).clear_watchlist_id()
    }
}

/// SQLite-backed key/value preference store
pub struct PreferenceDb {
    conn: Mutex<Connection>,
}

impl PreferenceDb {
    /// Open the store at the platform data directory
    pub fn new() -> Result<Self> {
        let data_dir = Self::get_data_dir();
        std::fs::create_dir_all(&data_dir)?;
        Self::open(&data_dir.join("preferences.db"))
    }

    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = PreferenceDb {
            conn: Mutex::new(conn),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn get_data_dir() -> PathBuf {
        if let Some(data_dir) = dirs::data_dir() {
            data_dir.join("hallfav")
        } else {
            std::env::temp_dir().join("hallfav")
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("preference store lock poisoned"))
    }

    fn init_schema(&self) -> Result<()> {
        self.lock()?.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            ) WITHOUT ROWID;
            ",
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.execute(
            "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.lock()?
            .execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl PreferenceStore for PreferenceDb {
    fn load_watchlist_id(&self) -> Result<Option<String>> {
        Ok(self
            .get(WATCHLIST_PREFERENCE_KEY)?
            .filter(|id| !id.is_empty()))
    }

    fn save_watchlist_id(&self, watchlist_id: &str) -> Result<()> {
        self.set(WATCHLIST_PREFERENCE_KEY, watchlist_id)
    }

    fn clear_watchlist_id(&self) -> Result<()> {
        self.remove(WATCHLIST_PREFERENCE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_no_preference() {
        let db = PreferenceDb::open_in_memory().unwrap();
        assert_eq!(db.load_watchlist_id().unwrap(), None);
    }

    #[test]
    fn test_save_overwrites_previous_choice() {
        let db = PreferenceDb::open_in_memory().unwrap();
        db.save_watchlist_id("w1").unwrap();
        db.save_watchlist_id("w2").unwrap();
        assert_eq!(db.load_watchlist_id().unwrap().as_deref(), Some("w2"));
    }

    #[test]
    fn test_clear_removes_choice() {
        let db = PreferenceDb::open_in_memory().unwrap();
        db.save_watchlist_id("w1").unwrap();
        db.clear_watchlist_id().unwrap();
        assert_eq!(db.load_watchlist_id().unwrap(), None);
        // Clearing twice is fine
        db.clear_watchlist_id().unwrap();
    }

    #[test]
    fn test_empty_value_reads_as_absent() {
        let db = PreferenceDb::open_in_memory().unwrap();
        db.set(WATCHLIST_PREFERENCE_KEY, "").unwrap();
        assert_eq!(db.load_watchlist_id().unwrap(), None);
    }
}
