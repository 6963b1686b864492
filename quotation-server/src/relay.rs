use crate::config::PersistencePolicy;
use crate::db::Database;
use crate::error::Result;
use crate::models::Quotation;
use crate::upstream::UpstreamClient;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Where a quotation request is in its fetch → persist → respond sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetching,
    FetchFailed,
    Fetched,
    Persisting,
    PersistFailed,
    Persisted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Fetching => "fetching",
            Phase::FetchFailed => "fetch-failed",
            Phase::Fetched => "fetched",
            Phase::Persisting => "persisting",
            Phase::PersistFailed => "persist-failed",
            Phase::Persisted => "persisted",
        };
        f.write_str(name)
    }
}

/// Per-hop time budgets. Each one is handed to its own hop and none is
/// derived from another.
#[derive(Debug, Clone, Copy)]
pub struct Budgets {
    pub fetch: Duration,
    pub persist: Duration,
}

/// Runs one quotation request: fetch upstream, then persist, strictly in
/// that order. Returns the quotation whose bid should be sent back.
pub async fn relay_quotation(
    upstream: &UpstreamClient,
    db: &Database,
    budgets: Budgets,
    policy: PersistencePolicy,
) -> Result<Quotation> {
    let started = Instant::now();

    debug!("[RELAY] {}", Phase::Fetching);
    let quotation = match upstream.fetch_quotation(budgets.fetch).await {
        Ok(quotation) => quotation,
        Err(e) => {
            warn!("[RELAY] {} after {:?}: {}", Phase::FetchFailed, started.elapsed(), e);
            return Err(e);
        }
    };
    debug!("[RELAY] {} in {:?}", Phase::Fetched, started.elapsed());

    debug!("[RELAY] {}", Phase::Persisting);
    let persisting = Instant::now();
    match db.insert_quotation(&quotation, budgets.persist).await {
        Ok(record) => {
            debug!(
                "[RELAY] {} {} in {:?}",
                Phase::Persisted,
                record.id,
                persisting.elapsed()
            );
        }
        Err(e) => match policy {
            PersistencePolicy::Fatal => {
                warn!("[RELAY] {} after {:?}: {}", Phase::PersistFailed, persisting.elapsed(), e);
                return Err(e);
            }
            PersistencePolicy::BestEffort => {
                warn!(
                    "[RELAY] {} after {:?}, responding anyway: {}",
                    Phase::PersistFailed,
                    persisting.elapsed(),
                    e
                );
            }
        },
    }

    info!("[RELAY] bid={} relayed in {:?}", quotation.bid, started.elapsed());
    Ok(quotation)
}
