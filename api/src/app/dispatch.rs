//! Request dispatcher
//!
//! Single entry point for inbound webhook payloads. All work serializes
//! behind one process-wide lock per backing workbook, acquired with a
//! bounded wait; once held, the dispatched action runs to completion. The
//! guard releases on every exit path, success or error.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::app::aggregate::AggregationService;
use crate::app::ratings::{RatingService, RatingUpdateSummary};
use crate::app::standings::StandingsService;
use crate::config::BoardConfig;
use crate::domain::entities::WebhookPayload;
use crate::domain::ports::TabularStore;
use crate::error::DomainError;

/// What a dispatched request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    StandingsAdded { sheet_name: String },
    /// The sheet name was already processed; nothing was written.
    AlreadyProcessed { sheet_name: String },
    RatingsUpdated { applied: usize, skipped: usize },
}

pub struct DispatchService<S: TabularStore> {
    store: Arc<S>,
    config: Arc<BoardConfig>,
    lock: Mutex<()>,
    standings: StandingsService<S>,
    aggregation: AggregationService<S>,
    ratings: RatingService<S>,
}

impl<S: TabularStore> DispatchService<S> {
    pub fn new(store: Arc<S>, config: Arc<BoardConfig>) -> Self {
        Self {
            standings: StandingsService::new(store.clone(), config.clone()),
            aggregation: AggregationService::new(store.clone(), config.clone()),
            ratings: RatingService::new(store.clone(), config.clone()),
            lock: Mutex::new(()),
            store,
            config,
        }
    }

    /// Serialize, decode, and route one inbound payload.
    pub async fn dispatch(&self, payload: WebhookPayload) -> Result<DispatchOutcome, DomainError> {
        let _guard = timeout(self.config.lock_timeout, self.lock.lock())
            .await
            .map_err(|_| DomainError::LockTimeout)?;

        match payload {
            WebhookPayload::AddStandings(contest) => {
                if self.store.sheet_exists(&contest.sheet_name).await? {
                    tracing::info!(
                        sheet = contest.sheet_name.as_str(),
                        "Standings sheet already exists, ignoring redelivery"
                    );
                    return Ok(DispatchOutcome::AlreadyProcessed {
                        sheet_name: contest.sheet_name,
                    });
                }
                self.standings.write_standings(&contest).await?;
                self.aggregation.aggregate(&contest).await?;
                Ok(DispatchOutcome::StandingsAdded {
                    sheet_name: contest.sheet_name,
                })
            }
            WebhookPayload::UpdateRatings(update) => {
                let RatingUpdateSummary { applied, skipped } = self
                    .ratings
                    .update_ratings(update.online_judge, &update.ratings)
                    .await?;
                Ok(DispatchOutcome::RatingsUpdated { applied, skipped })
            }
        }
    }
}
