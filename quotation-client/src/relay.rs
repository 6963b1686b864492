use crate::error::{ClientError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::time;
use tracing::debug;

pub struct RelayClient {
    client: Client,
    url: String,
}

impl RelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Asks the relay for the current bid, giving up after `deadline`.
    pub async fn fetch_bid(&self, deadline: Duration) -> Result<String> {
        debug!("Requesting quotation from {}", self.url);

        let body = time::timeout(deadline, self.fetch_body())
            .await
            .map_err(|_| ClientError::Timeout(deadline))??;

        extract_bid(&body)
    }

    async fn fetch_body(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::RelayStatus {
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// The body has to be JSON. A missing or non-string `bid` reads as "".
pub fn extract_bid(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;
    Ok(value
        .get("bid")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}
