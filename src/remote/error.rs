use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Catalog not configured: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Catalog HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        RemoteError::Network(e.to_string())
    }
}
