pub mod artifact;
pub mod config;
pub mod error;
pub mod relay;

use crate::config::Config;
use crate::error::Result;
use crate::relay::RelayClient;
use tracing::info;

/// Fetches one bid from the relay and writes it to the configured file.
/// The file is only touched once a bid has been received.
pub async fn run(config: &Config) -> Result<String> {
    let client = RelayClient::new(config.relay_url.clone());
    let bid = client.fetch_bid(config.request_timeout).await?;
    info!("Received bid {:?}", bid);

    artifact::save_bid(&config.output_path, &bid).await?;
    Ok(bid)
}
