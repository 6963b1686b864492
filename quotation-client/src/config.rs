use crate::error::{ClientError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub relay_url: String,
    pub request_timeout: Duration,
    pub output_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let relay_url = env::var("RELAY_URL")
            .unwrap_or_else(|_| "http://localhost:8080/cotacao".to_string());

        let request_timeout = env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ClientError::Config("Invalid REQUEST_TIMEOUT_MS".to_string()))?;

        let output_path = env::var("QUOTATION_FILE")
            .unwrap_or_else(|_| "cotacao.txt".to_string())
            .into();

        Ok(Self {
            relay_url,
            request_timeout,
            output_path,
        })
    }
}
