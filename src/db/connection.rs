use rusqlite::Connection;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Handle to a SQLite file with a lazily opened connection.
///
/// Each handle owns its own connection, so two handles on the same path behave
/// like two browser tabs sharing one origin's storage: they see each other's
/// committed writes but are notified of them only by polling.
pub struct Database {
    path: PathBuf,
    conn: RefCell<Option<Connection>>,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Provides a mutable connection to the closure, opening it on first use.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        let mut slot = self
            .conn
            .try_borrow_mut()
            .map_err(|_| StoreError::Unavailable)?;

        if slot.is_none() {
            let conn = Connection::open(&self.path)
                .map_err(|e| StoreError::DbError(format!("Open DB failed: {e}")))?;
            *slot = Some(conn);
        }

        match slot.as_mut() {
            Some(conn) => f(conn),
            None => Err(StoreError::Unavailable),
        }
    }
}

// A clone is a second context on the same file, with its own connection.
impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

/// Create the key-value table if it does not exist yet.
pub fn init_db(db: &Database) -> Result<(), StoreError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| StoreError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    tracing::info!(path = %db.path().display(), "database initialized");
    Ok(())
}
