use crate::models::BidResponse;
use crate::relay::{self, Budgets};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn get_quotation(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<BidResponse>, StatusCode> {
    let budgets = Budgets {
        fetch: state.fetch_timeout,
        persist: state.persist_timeout,
    };

    match relay::relay_quotation(&state.upstream, &state.db, budgets, state.persistence_policy).await
    {
        Ok(quotation) => Ok(Json(BidResponse::from(&quotation))),
        Err(e) => Err(StatusCode::from(e)),
    }
}

pub async fn list_records(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.db.list_records().await {
        Ok(records) => {
            for record in &records {
                state.sink.emit(record);
            }
            info!("Listed {} stored quotations", records.len());
            StatusCode::OK
        }
        Err(e) => {
            warn!("Failed to list stored quotations: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
