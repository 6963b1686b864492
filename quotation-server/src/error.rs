use axum::http::StatusCode;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("JSON parsing failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Upstream fetch exceeded {0:?}")]
    FetchTimeout(Duration),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Persistence exceeded {0:?}")]
    PersistTimeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;

// Callers of the relay never learn which hop failed.
impl From<RelayError> for StatusCode {
    fn from(_err: RelayError) -> Self {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
