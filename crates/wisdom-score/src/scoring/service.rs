use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::calculator::{FulfillmentCalculator, ScoreResult};
use super::domain::{Boundary, Commitment, Event, LifeArea, LifeAreaId};
use super::repository::{LifeAreaStore, StoreError};
use crate::config::ScoringConfig;

/// Service composing the life-area store with the fulfillment calculator.
pub struct FulfillmentService<S> {
    store: Arc<S>,
    calculator: FulfillmentCalculator,
    event_window: Duration,
}

impl<S> FulfillmentService<S>
where
    S: LifeAreaStore + 'static,
{
    pub fn new(store: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            store,
            calculator: FulfillmentCalculator::new(),
            event_window: config.event_window(),
        }
    }

    pub fn calculator(&self) -> &FulfillmentCalculator {
        &self.calculator
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Score a life area from the store without persisting the result.
    pub fn preview(
        &self,
        life_area_id: &LifeAreaId,
        now: DateTime<Utc>,
    ) -> Result<ScoreResult, ScoringServiceError> {
        let since = self.window_start(now)?;
        let events = self.store.fetch_recent_events(life_area_id, since)?;
        let commitments = self.store.fetch_commitments(life_area_id)?;
        let boundaries = self.store.fetch_boundaries(life_area_id)?;

        Ok(self
            .calculator
            .calculate(&events, &commitments, &boundaries))
    }

    /// Score caller-supplied records, counting only events inside the configured window.
    pub fn preview_records(
        &self,
        events: &[Event],
        commitments: &[Commitment],
        boundaries: &[Boundary],
        now: DateTime<Utc>,
    ) -> Result<ScoreResult, ScoringServiceError> {
        let since = self.window_start(now)?;
        let recent: Vec<Event> = events
            .iter()
            .filter(|event| event.occurred_at >= since)
            .cloned()
            .collect();

        Ok(self.calculator.calculate(&recent, commitments, boundaries))
    }

    fn window_start(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, ScoringServiceError> {
        now.checked_sub_signed(self.event_window)
            .ok_or(ScoringServiceError::WindowOutOfRange {
                days: self.event_window.num_days(),
            })
    }

    /// Score a life area and write the derived fields back.
    pub fn recalculate(
        &self,
        life_area_id: &LifeAreaId,
        now: DateTime<Utc>,
    ) -> Result<ScoreResult, ScoringServiceError> {
        let result = self.preview(life_area_id, now)?;
        self.store
            .persist_score(life_area_id, result.score, result.status, now)?;

        debug!(
            life_area_id = %life_area_id,
            score = result.score.value(),
            status = result.status.label(),
            "life area recalculated"
        );
        Ok(result)
    }

    /// Recalculate every life area, continuing past per-entity failures.
    ///
    /// Only a failure to list the life areas aborts the batch.
    pub fn recalculate_all(
        &self,
        now: DateTime<Utc>,
    ) -> Result<RecalculationSummary, ScoringServiceError> {
        let ids = self.store.list_life_area_ids()?;
        let mut summary = RecalculationSummary::default();

        for id in ids {
            match self.recalculate(&id, now) {
                Ok(result) => summary.recalculated.push(RecalculatedLifeArea {
                    life_area_id: id,
                    score: result.score.value(),
                    status: result.status.label(),
                }),
                Err(error) => {
                    warn!(life_area_id = %id, %error, "life area recalculation failed");
                    summary.failures.push(RecalculationFailure {
                        life_area_id: id,
                        error: error.to_string(),
                    });
                }
            }
        }

        info!(
            recalculated = summary.recalculated.len(),
            failed = summary.failures.len(),
            "batch recalculation finished"
        );
        Ok(summary)
    }

    pub fn life_area(&self, life_area_id: &LifeAreaId) -> Result<LifeArea, ScoringServiceError> {
        let life_area = self
            .store
            .fetch_life_area(life_area_id)?
            .ok_or(StoreError::NotFound)?;
        Ok(life_area)
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecalculationSummary {
    pub recalculated: Vec<RecalculatedLifeArea>,
    pub failures: Vec<RecalculationFailure>,
}

impl RecalculationSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecalculatedLifeArea {
    pub life_area_id: LifeAreaId,
    pub score: f64,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecalculationFailure {
    pub life_area_id: LifeAreaId,
    pub error: String,
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("event window of {days} days reaches before the earliest representable date")]
    WindowOutOfRange { days: i64 },
}
