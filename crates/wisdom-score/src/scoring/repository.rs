use chrono::{DateTime, Utc};

use super::domain::{
    Boundary, Commitment, Event, FulfillmentScore, LifeArea, LifeAreaId, LifeAreaStatus,
};

/// Storage abstraction so the recalculation service can be exercised in isolation.
///
/// Implementations own retry and backoff; the service propagates their errors unchanged.
pub trait LifeAreaStore: Send + Sync {
    fn list_life_area_ids(&self) -> Result<Vec<LifeAreaId>, StoreError>;

    fn fetch_life_area(&self, id: &LifeAreaId) -> Result<Option<LifeArea>, StoreError>;

    /// Events at or after `since`, most recent first.
    fn fetch_recent_events(
        &self,
        id: &LifeAreaId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError>;

    fn fetch_commitments(&self, id: &LifeAreaId) -> Result<Vec<Commitment>, StoreError>;

    fn fetch_boundaries(&self, id: &LifeAreaId) -> Result<Vec<Boundary>, StoreError>;

    fn persist_score(
        &self,
        id: &LifeAreaId,
        score: FulfillmentScore,
        status: LifeAreaStatus,
        scored_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// Error enumeration for data-access failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("life area not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}
