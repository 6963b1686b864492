use anyhow::Result;
use dotenv::dotenv;
use quotation_server::config::Config;
use quotation_server::db::Database;
use quotation_server::sink::LogSink;
use quotation_server::AppState;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    dotenv().ok();
    let config = Config::from_env()?;

    let db = Database::new(&config.database_url, config.max_connections).await?;
    db.init_schema().await?;

    info!(
        "Upstream {} (fetch budget {:?}, persist budget {:?}, policy {:?})",
        config.upstream_url,
        config.fetch_timeout,
        config.persist_timeout,
        config.persistence_policy
    );

    let state = Arc::new(AppState::new(&config, db, Arc::new(LogSink)));

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting quotation relay on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    quotation_server::serve(listener, state, shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
