// errors.rs
use thiserror::Error;

/// Errors raised by the local storage layer (SQLite medium, JSON payloads).
///
/// The property store never hands these to its callers; it logs them and
/// degrades to defaults or to its in-memory view instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Serialization Error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Storage unavailable")]
    Unavailable,
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::DbError(e.to_string())
    }
}

/// Errors from reading configuration out of the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
