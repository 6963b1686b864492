pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod relay;
pub mod sink;
pub mod upstream;

use crate::config::{Config, PersistencePolicy};
use crate::db::Database;
use crate::error::Result;
use crate::sink::RecordSink;
use crate::upstream::UpstreamClient;
use axum::{routing::get, Router};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct AppState {
    pub upstream: UpstreamClient,
    pub db: Database,
    pub sink: Arc<dyn RecordSink>,
    pub fetch_timeout: Duration,
    pub persist_timeout: Duration,
    pub persistence_policy: PersistencePolicy,
}

impl AppState {
    pub fn new(config: &Config, db: Database, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            upstream: UpstreamClient::new(config.upstream_url.clone()),
            db,
            sink,
            fetch_timeout: config.fetch_timeout,
            persist_timeout: config.persist_timeout,
            persistence_policy: config.persistence_policy,
        }
    }
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cotacao", get(handlers::get_quotation))
        .route("/test", get(handlers::list_records))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the relay until `shutdown` resolves, then drains in-flight
/// requests and closes the storage pool.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = state.db.clone();
    let app = app_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    db.close().await;
    info!("Quotation relay stopped");
    Ok(())
}
