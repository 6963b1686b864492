use crate::error::{RelayError, Result};
use crate::models::{Quotation, UpstreamEnvelope};
use reqwest::Client;
use std::time::Duration;
use tokio::time;
use tracing::{debug, info};

#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    url: String,
}

impl UpstreamClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Fetches the current USD/BRL quotation. The whole exchange, body
    /// included, must finish within `deadline` or the request is dropped.
    pub async fn fetch_quotation(&self, deadline: Duration) -> Result<Quotation> {
        debug!("Fetching quotation from {}", self.url);

        let envelope = time::timeout(deadline, self.fetch_envelope())
            .await
            .map_err(|_| RelayError::FetchTimeout(deadline))??;

        if let Some(name) = envelope.usdbrl.name.as_deref() {
            debug!("Upstream pair: {}", name);
        }

        let quotation = Quotation::from(envelope);
        info!(
            "[UPSTREAM] {}/{} bid={} created={}",
            quotation.code, quotation.code_in, quotation.bid, quotation.create_date
        );
        Ok(quotation)
    }

    async fn fetch_envelope(&self) -> Result<UpstreamEnvelope> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(RelayError::UpstreamStatus {
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await?;
        let envelope = serde_json::from_str(&text)?;
        Ok(envelope)
    }
}
