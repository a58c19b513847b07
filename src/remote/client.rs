// client.rs
use crate::config::RemoteConfig;
use crate::domain::Property;
use crate::remote::RemoteError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use url::Url;

/// Read-only access to a listing source.
pub trait PropertySource {
    fn fetch_all(&self) -> Result<Vec<Property>, RemoteError>;
    fn fetch_by_id(&self, id: &str) -> Result<Option<Property>, RemoteError>;
}

/// Client for the hosted `properties` table behind a PostgREST endpoint.
pub struct RemoteCatalog {
    client: Client,
    base_url: Url,
    table: String,
}

impl RemoteCatalog {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.api_key)
                .map_err(|e| RemoteError::Config(format!("invalid api key: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| RemoteError::Config(format!("invalid api key: {e}")))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            table: config.table.clone(),
        })
    }

    /// `{base}/rest/v1/{table}?select=*` plus any extra filters.
    pub fn table_url(&self, filters: &[(&str, String)]) -> Result<Url, RemoteError> {
        let mut url = self
            .base_url
            .join(&format!("rest/v1/{}", self.table))
            .map_err(|e| RemoteError::Config(format!("bad catalog url: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            for (k, v) in filters {
                query.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn get_rows(&self, url: Url) -> Result<Vec<Property>, RemoteError> {
        tracing::debug!(%url, "querying remote catalog");

        let resp = self.client.get(url).send()?;
        let status = resp.status();
        let text = resp.text()?;

        rows_from_response(status, text)
    }
}

impl PropertySource for RemoteCatalog {
    fn fetch_all(&self) -> Result<Vec<Property>, RemoteError> {
        let url = self.table_url(&[("order", "created_at.desc".to_string())])?;
        self.get_rows(url)
    }

    fn fetch_by_id(&self, id: &str) -> Result<Option<Property>, RemoteError> {
        let url = self.table_url(&[("id", format!("eq.{id}")), ("limit", "1".to_string())])?;
        Ok(self.get_rows(url)?.into_iter().next())
    }
}

/// Non-2xx responses become `RemoteError::Status` with the body kept for logs.
pub fn rows_from_response(status: StatusCode, body: String) -> Result<Vec<Property>, RemoteError> {
    if !status.is_success() {
        return Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        });
    }
    decode_rows(&body)
}

/// Decode a PostgREST JSON array of rows.
pub fn decode_rows(body: &str) -> Result<Vec<Property>, RemoteError> {
    serde_json::from_str(body).map_err(|e| RemoteError::JsonParse(e.to_string()))
}
