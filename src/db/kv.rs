// src/db/kv.rs
use crate::db::connection::Database;
use crate::errors::StoreError;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

/// Whole-value key-value storage scoped to one origin.
///
/// Values are read and written as a unit; there is no partial access.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites any previous value for `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// A marker that changes whenever *another* context commits a write.
    ///
    /// Writes made through `self` leave it unchanged, mirroring browser storage
    /// events, which never fire in the tab that wrote.
    fn external_version(&self) -> Result<i64, StoreError>;
}

/// `KeyValueStorage` over the `kv_store` table.
#[derive(Clone)]
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::DbError(format!("read of '{key}' failed: {e}")))
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().naive_utc();
        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, value, now],
            )
            .map_err(|e| StoreError::DbError(format!("write of '{key}' failed: {e}")))?;
            Ok(())
        })
    }

    fn external_version(&self) -> Result<i64, StoreError> {
        self.db.with_conn(|conn| {
            conn.query_row("PRAGMA data_version", [], |row| row.get(0))
                .map_err(StoreError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::make_db;

    #[test]
    fn missing_key_reads_as_none() {
        let (_dir, db) = make_db();
        let storage = SqliteStorage::new(db);
        assert_eq!(storage.get_item("nope").unwrap(), None);
    }

    #[test]
    fn set_item_overwrites_previous_value() {
        let (_dir, db) = make_db();
        let storage = SqliteStorage::new(db);

        storage.set_item("k", "first").unwrap();
        storage.set_item("k", "second").unwrap();

        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn external_version_ignores_own_writes_but_sees_others() {
        let (_dir, db) = make_db();
        let tab_a = SqliteStorage::new(db.clone());
        let tab_b = SqliteStorage::new(db);

        let before = tab_a.external_version().unwrap();
        tab_a.set_item("k", "from a").unwrap();
        assert_eq!(tab_a.external_version().unwrap(), before);

        tab_b.set_item("k", "from b").unwrap();
        assert_ne!(tab_a.external_version().unwrap(), before);
    }
}
