//! Database layer for hexcoord.
//!
//! Provides SQLite-based persistence for cube coordinates and shapes:
//! - PointStore: one canonical row per distinct (q, r, s)
//! - ShapeStore: shape headers plus their ordered point lists
//!
//! Every mutating operation runs in a single transaction.

mod points;
mod schema;
mod shapes;

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};

use hexcoord_shared::errors::{HexcoordError, HexcoordResult};

pub use points::PointStore;
pub use shapes::{ClearSummary, ShapeStore};

pub(crate) use points::find_or_create_in;
pub(crate) use shapes::create_in;

/// Helper macro to convert rusqlite errors to HexcoordError.
macro_rules! db_err {
    ($result:expr) => {
        $result.map_err(|e| HexcoordError::Database(e.to_string()))
    };
}

pub(crate) use db_err;

/// SQLite database handle.
///
/// Thread-safe via `parking_lot::Mutex`. Domain-specific stores
/// wrap this to provide their APIs (e.g., `ShapeStore`).
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database.
    pub fn open(db_path: &Path) -> HexcoordResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = db_err!(Connection::open(db_path))?;

        // - Busy timeout: first, so the pragmas below also wait on locks
        // - WAL mode: readers do not block the writer
        // - Foreign keys: required for ON DELETE CASCADE
        db_err!(conn.execute_batch(
            "
            PRAGMA busy_timeout=5000;
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA foreign_keys=ON;
            "
        ))?;

        Self::from_connection(conn)
    }

    /// Create an in-memory database (for tests and throwaway runs).
    pub fn open_in_memory() -> HexcoordResult<Self> {
        let conn = db_err!(Connection::open_in_memory())?;
        db_err!(conn.execute_batch("PRAGMA foreign_keys=ON;"))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> HexcoordResult<Self> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Acquire the database connection.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Run `f` inside one transaction.
    ///
    /// The write lock is taken up front (`BEGIN IMMEDIATE`) so concurrent
    /// writers queue on the busy timeout instead of failing mid-transaction.
    /// Commits when `f` returns `Ok`; any error drops the transaction,
    /// which rolls back everything `f` wrote.
    pub(crate) fn with_transaction<T, F>(&self, f: F) -> HexcoordResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> HexcoordResult<T>,
    {
        let mut conn = self.conn();
        let tx = db_err!(conn.transaction_with_behavior(TransactionBehavior::Immediate))?;
        let value = f(&tx)?;
        db_err!(tx.commit())?;
        Ok(value)
    }

    /// Initialize database schema.
    ///
    /// New DB: apply full schema. Same version: nothing to do.
    /// Any other version is an error.
    fn init_schema(conn: &Connection) -> HexcoordResult<()> {
        db_err!(conn.execute_batch(schema::SCHEMA_VERSION_TABLE))?;

        let current_version: Option<i32> = db_err!(
            conn.query_row(
                "SELECT version FROM schema_version WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()
        )?;

        match current_version {
            None => Self::apply_full_schema(conn)?,
            Some(v) if v == schema::SCHEMA_VERSION => {}
            Some(v) => {
                return Err(HexcoordError::Database(format!(
                    "Schema version mismatch: database has v{}, process expects v{}.",
                    v,
                    schema::SCHEMA_VERSION
                )));
            }
        }

        Ok(())
    }

    /// Apply full schema for new database.
    fn apply_full_schema(conn: &Connection) -> HexcoordResult<()> {
        for sql in schema::all_schemas() {
            db_err!(conn.execute_batch(sql))?;
        }

        let now = Utc::now().to_rfc3339();
        db_err!(conn.execute(
            "INSERT INTO schema_version (id, version, updated_at) VALUES (1, ?1, ?2)",
            rusqlite::params![schema::SCHEMA_VERSION, now],
        ))?;

        tracing::info!(
            "Initialized database schema version {}",
            schema::SCHEMA_VERSION
        );
        Ok(())
    }
}
