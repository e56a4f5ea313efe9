//! `SQLite`-based reference store.
//!
//! One row per topic, reference list serialized as JSON. This is the
//! authoritative cache tier that survives process restarts.

use super::{ReferenceStore, acquire_lock, configure_connection};
use crate::models::CacheRecord;
use crate::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;
use std::sync::Mutex;

/// `SQLite`-based reference store.
///
/// # Concurrency Model
///
/// Uses a `Mutex<Connection>` for thread-safe access within one handle.
/// WAL mode and the `busy_timeout` pragma make concurrent handles against
/// the same database file safe, so workers that want to avoid contending on
/// one mutex open their own `SqliteReferenceStore` for the same path.
pub struct SqliteReferenceStore {
    /// Connection to the `SQLite` database.
    ///
    /// Protected by Mutex because `rusqlite::Connection` is not `Sync`.
    conn: Mutex<Connection>,
    /// Path to the database (None for in-memory).
    db_path: Option<PathBuf>,
}

impl SqliteReferenceStore {
    /// Opens (creating if needed) a reference store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use wikihop::storage::SqliteReferenceStore;
    ///
    /// let store = SqliteReferenceStore::new("./pages.db")?;
    /// # Ok::<(), wikihop::Error>(())
    /// ```
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = Connection::open(&db_path).map_err(|e| Error::OperationFailed {
            operation: "open_sqlite".to_string(),
            cause: e.to_string(),
        })?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path),
        };

        store.initialize()?;
        Ok(store)
    }

    /// Creates an in-memory reference store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::OperationFailed {
            operation: "open_sqlite_in_memory".to_string(),
            cause: e.to_string(),
        })?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };

        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub const fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    /// Initializes the schema.
    fn initialize(&self) -> Result<()> {
        let conn = acquire_lock(&self.conn);

        configure_connection(&conn);

        conn.execute(
            "CREATE TABLE IF NOT EXISTS pages (
                topic TEXT PRIMARY KEY,
                refs TEXT NOT NULL,
                fetched_at INTEGER NOT NULL
            )",
            [],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "create_pages_table".to_string(),
            cause: e.to_string(),
        })?;

        Ok(())
    }
}

impl ReferenceStore for SqliteReferenceStore {
    fn load(&self, topic: &str) -> Result<Option<CacheRecord>> {
        let conn = acquire_lock(&self.conn);

        let row: Option<(String, u64)> = conn
            .query_row(
                "SELECT refs, fetched_at FROM pages WHERE topic = ?1",
                params![topic],
                |row| Ok((row.get(0)?, row.get::<_, i64>(1)? as u64)),
            )
            .optional()
            .map_err(|e| Error::OperationFailed {
                operation: "load_references".to_string(),
                cause: e.to_string(),
            })?;

        let Some((payload, fetched_at)) = row else {
            return Ok(None);
        };

        let references: Vec<String> =
            serde_json::from_str(&payload).map_err(|e| Error::OperationFailed {
                operation: "decode_references".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Some(CacheRecord {
            topic: topic.to_string(),
            references,
            fetched_at,
        }))
    }

    fn save(&self, record: &CacheRecord) -> Result<()> {
        let payload =
            serde_json::to_string(&record.references).map_err(|e| Error::OperationFailed {
                operation: "encode_references".to_string(),
                cause: e.to_string(),
            })?;

        let conn = acquire_lock(&self.conn);
        conn.execute(
            "INSERT OR REPLACE INTO pages (topic, refs, fetched_at) VALUES (?1, ?2, ?3)",
            params![record.topic, payload, record.fetched_at as i64],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "save_references".to_string(),
            cause: e.to_string(),
        })?;

        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let conn = acquire_lock(&self.conn);
        conn.query_row("SELECT COUNT(*) FROM pages", [], |row| {
            row.get::<_, i64>(0).map(|n| n as usize)
        })
        .map_err(|e| Error::OperationFailed {
            operation: "count_references".to_string(),
            cause: e.to_string(),
        })
    }
}
