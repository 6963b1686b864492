use crate::error::{RelayError, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

/// What the quotation handler does when the storage write fails or runs out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistencePolicy {
    /// The request fails with 500 and no bid is sent.
    Fatal,
    /// The failure is logged and the bid is still returned.
    BestEffort,
}

impl FromStr for PersistencePolicy {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Ok(PersistencePolicy::Fatal),
            "best-effort" | "best_effort" => Ok(PersistencePolicy::BestEffort),
            other => Err(RelayError::Config(format!(
                "Invalid PERSISTENCE_POLICY: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub upstream_url: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub fetch_timeout: Duration,
    pub persist_timeout: Duration,
    pub persistence_policy: PersistencePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let upstream_url =
            env::var("UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());

        let sqlite_path =
            env::var("SQLITE_DB_PATH").unwrap_or_else(|_| "./quotation.db".to_string());
        let database_url = format!("sqlite:{}", sqlite_path);

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| RelayError::Config("Invalid PORT".to_string()))?;

        let max_connections = env::var("MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|_| RelayError::Config("Invalid MAX_CONNECTIONS".to_string()))?;

        let fetch_timeout = millis_from_env("FETCH_TIMEOUT_MS", 200)?;
        let persist_timeout = millis_from_env("PERSIST_TIMEOUT_MS", 10)?;

        let persistence_policy = env::var("PERSISTENCE_POLICY")
            .unwrap_or_else(|_| "fatal".to_string())
            .parse()?;

        Ok(Self {
            upstream_url,
            port,
            database_url,
            max_connections,
            fetch_timeout,
            persist_timeout,
            persistence_policy,
        })
    }
}

fn millis_from_env(key: &str, default: u64) -> Result<Duration> {
    let millis = match env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|_| RelayError::Config(format!("Invalid {}", key)))?,
        Err(_) => default,
    };
    Ok(Duration::from_millis(millis))
}
