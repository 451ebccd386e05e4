// Persistence boundary
// Each store serializes its full state as one JSON blob under a
// namespaced key. An absent key means first run: the owning store takes
// its default-initialization branch. No schema versioning or migration.

use rusqlite::{Connection, OpenFlags};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Storage layer error type
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage lock poisoned")]
    Lock,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable key/value storage over a local SQLite database.
///
/// Cloning shares the underlying connection. Within one app instance all
/// access is sequential (UI-callback-driven); the mutex exists so the
/// handle can be shared, not to coordinate concurrent writers.
/// Cross-instance writes are last-writer-wins by design.
#[derive(Clone)]
pub struct Storage {
    conn: Arc<Mutex<Connection>>,
}

impl Storage {
    /// Open (or create) the backing database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;

        // WAL mode for crash safety on mobile webviews
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS store_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::Lock)
    }

    /// Read the raw blob persisted under `key`, if any.
    pub fn load_raw(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare("SELECT value FROM store_state WHERE key = ?1")?;
        let mut rows = stmt.query(rusqlite::params![key])?;

        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Write the raw blob for `key`, replacing any previous value.
    pub fn save_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT OR REPLACE INTO store_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    /// Remove the blob for `key`. Returns whether a row was deleted.
    pub fn remove(&self, key: &str) -> StorageResult<bool> {
        let conn = self.lock()?;

        let affected = conn.execute(
            "DELETE FROM store_state WHERE key = ?1",
            rusqlite::params![key],
        )?;

        Ok(affected > 0)
    }

    /// Deserialize the state persisted under `key`; `None` on first run.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.load_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and persist `value` under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.save_raw(key, &raw)
    }
}
