use anyhow::Result;
use dotenv::dotenv;
use quotation_client::config::Config;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    dotenv().ok();
    let config = Config::from_env()?;

    if let Err(e) = quotation_client::run(&config).await {
        error!("Quotation request failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
