// config.rs
use crate::errors::ConfigError;
use crate::store::DEFAULT_STORAGE_KEY;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_DB_PATH: &str = "listings.sqlite3";
pub const DEFAULT_TABLE: &str = "properties";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Runtime settings, read from the environment (and an optional `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub storage_key: String,
    /// `None` when the hosted catalog is not configured.
    pub remote: Option<RemoteConfig>,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: Url,
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development.
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "could not load .env file");
            }
        }

        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Builds a config from an explicit variable map; blank values count as unset.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let db_path = get("LISTINGS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let storage_key =
            get("LISTINGS_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        let remote = match (get("SUPABASE_URL"), get("SUPABASE_ANON_KEY")) {
            (Some(url), Some(api_key)) => {
                let base_url = Url::parse(&url).map_err(|e| ConfigError::Invalid {
                    var: "SUPABASE_URL",
                    reason: e.to_string(),
                })?;

                let timeout_secs = match get("REMOTE_TIMEOUT_SECS") {
                    Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                        var: "REMOTE_TIMEOUT_SECS",
                        reason: e.to_string(),
                    })?,
                    None => DEFAULT_TIMEOUT_SECS,
                };

                Some(RemoteConfig {
                    base_url,
                    api_key,
                    table: get("SUPABASE_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            (url, key) => {
                if url.is_some() || key.is_some() {
                    tracing::warn!("SUPABASE_URL and SUPABASE_ANON_KEY must both be set; remote catalog disabled");
                }
                None
            }
        };

        Ok(Config {
            db_path,
            storage_key,
            remote,
        })
    }
}
