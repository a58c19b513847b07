use crate::db::connection::{init_db, Database};
use crate::db::SqliteStorage;
use crate::domain::Property;
use crate::remote::{PropertySource, RemoteError};
use crate::store::PropertyStore;
use tempfile::TempDir;

/// A fresh SQLite file with the schema applied. Keep the `TempDir` alive for
/// as long as the database is used.
pub fn make_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = Database::new(dir.path().join("listings_test.sqlite3"));
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    (dir, db)
}

/// A store over its own connection to `db`'s file, like one more browser tab.
pub fn open_store(db: &Database) -> PropertyStore<SqliteStorage> {
    PropertyStore::new(SqliteStorage::new(db.clone()), "properties")
}

/// A listing source that either serves fixed rows or fails every request.
pub enum FakeSource {
    Rows(Vec<Property>),
    Fails,
}

impl PropertySource for FakeSource {
    fn fetch_all(&self) -> Result<Vec<Property>, RemoteError> {
        match self {
            FakeSource::Rows(rows) => Ok(rows.clone()),
            FakeSource::Fails => Err(RemoteError::Network("connection refused".to_string())),
        }
    }

    fn fetch_by_id(&self, id: &str) -> Result<Option<Property>, RemoteError> {
        Ok(self.fetch_all()?.into_iter().find(|p| p.id == id))
    }
}
