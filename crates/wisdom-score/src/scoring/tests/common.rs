use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::config::ScoringConfig;
use crate::scoring::domain::{
    Boundary, Commitment, CommitmentStatus, Event, EventType, FulfillmentScore, LifeArea,
    LifeAreaId, LifeAreaStatus,
};
use crate::scoring::repository::{LifeAreaStore, StoreError};
use crate::scoring::FulfillmentService;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn area_id(raw: &str) -> LifeAreaId {
    LifeAreaId(raw.to_string())
}

pub(super) fn event(event_type: EventType, emotional_charge: i32, days_ago: i64) -> Event {
    Event {
        life_area_id: area_id("health"),
        event_type,
        emotional_charge,
        occurred_at: now() - Duration::days(days_ago),
    }
}

pub(super) fn commitment(status: CommitmentStatus) -> Commitment {
    Commitment {
        life_area_id: area_id("health"),
        status,
    }
}

pub(super) fn boundary(violation_count: u32) -> Boundary {
    Boundary {
        life_area_id: area_id("health"),
        violation_count,
    }
}

#[derive(Default)]
pub(super) struct AreaRecords {
    pub(super) life_area: Option<LifeArea>,
    pub(super) events: Vec<Event>,
    pub(super) commitments: Vec<Commitment>,
    pub(super) boundaries: Vec<Boundary>,
}

/// In-memory store; ids listed in `failing` return `Unavailable` on every read.
#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) areas: Arc<Mutex<BTreeMap<LifeAreaId, AreaRecords>>>,
    pub(super) failing: Arc<Mutex<HashSet<LifeAreaId>>>,
    pub(super) persisted: Arc<Mutex<Vec<(LifeAreaId, FulfillmentScore, LifeAreaStatus)>>>,
}

impl MemoryStore {
    pub(super) fn with_area(
        self,
        id: &str,
        events: Vec<Event>,
        commitments: Vec<Commitment>,
        boundaries: Vec<Boundary>,
    ) -> Self {
        let life_area_id = area_id(id);
        self.areas.lock().expect("store mutex poisoned").insert(
            life_area_id.clone(),
            AreaRecords {
                life_area: Some(LifeArea::new(life_area_id, id)),
                events,
                commitments,
                boundaries,
            },
        );
        self
    }

    pub(super) fn failing_for(self, id: &str) -> Self {
        self.failing
            .lock()
            .expect("store mutex poisoned")
            .insert(area_id(id));
        self
    }

    pub(super) fn persisted(&self) -> Vec<(LifeAreaId, FulfillmentScore, LifeAreaStatus)> {
        self.persisted.lock().expect("store mutex poisoned").clone()
    }

    fn check(&self, id: &LifeAreaId) -> Result<(), StoreError> {
        if self.failing.lock().expect("store mutex poisoned").contains(id) {
            return Err(StoreError::Unavailable("replica lagging".to_string()));
        }
        Ok(())
    }
}

impl LifeAreaStore for MemoryStore {
    fn list_life_area_ids(&self) -> Result<Vec<LifeAreaId>, StoreError> {
        Ok(self
            .areas
            .lock()
            .expect("store mutex poisoned")
            .keys()
            .cloned()
            .collect())
    }

    fn fetch_life_area(&self, id: &LifeAreaId) -> Result<Option<LifeArea>, StoreError> {
        self.check(id)?;
        let guard = self.areas.lock().expect("store mutex poisoned");
        Ok(guard.get(id).and_then(|records| records.life_area.clone()))
    }

    fn fetch_recent_events(
        &self,
        id: &LifeAreaId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError> {
        self.check(id)?;
        let guard = self.areas.lock().expect("store mutex poisoned");
        let mut events: Vec<Event> = guard
            .get(id)
            .map(|records| records.events.clone())
            .unwrap_or_default()
            .into_iter()
            .filter(|event| event.occurred_at >= since)
            .collect();
        events.sort_by(|left, right| right.occurred_at.cmp(&left.occurred_at));
        Ok(events)
    }

    fn fetch_commitments(&self, id: &LifeAreaId) -> Result<Vec<Commitment>, StoreError> {
        self.check(id)?;
        let guard = self.areas.lock().expect("store mutex poisoned");
        Ok(guard
            .get(id)
            .map(|records| records.commitments.clone())
            .unwrap_or_default())
    }

    fn fetch_boundaries(&self, id: &LifeAreaId) -> Result<Vec<Boundary>, StoreError> {
        self.check(id)?;
        let guard = self.areas.lock().expect("store mutex poisoned");
        Ok(guard
            .get(id)
            .map(|records| records.boundaries.clone())
            .unwrap_or_default())
    }

    fn persist_score(
        &self,
        id: &LifeAreaId,
        score: FulfillmentScore,
        status: LifeAreaStatus,
        scored_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.check(id)?;
        let mut guard = self.areas.lock().expect("store mutex poisoned");
        let records = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        if score.status() != status {
            return Err(StoreError::Malformed(format!("status {} for {score}", status.label())));
        }
        if let Some(life_area) = records.life_area.as_mut() {
            life_area.apply_score(score, scored_at);
        }
        self.persisted
            .lock()
            .expect("store mutex poisoned")
            .push((id.clone(), score, status));
        Ok(())
    }
}

/// Store whose every call fails, including listing.
pub(super) struct UnavailableStore;

impl LifeAreaStore for UnavailableStore {
    fn list_life_area_ids(&self) -> Result<Vec<LifeAreaId>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch_life_area(&self, _id: &LifeAreaId) -> Result<Option<LifeArea>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch_recent_events(
        &self,
        _id: &LifeAreaId,
        _since: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch_commitments(&self, _id: &LifeAreaId) -> Result<Vec<Commitment>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch_boundaries(&self, _id: &LifeAreaId) -> Result<Vec<Boundary>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn persist_score(
        &self,
        _id: &LifeAreaId,
        _score: FulfillmentScore,
        _status: LifeAreaStatus,
        _scored_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service(store: MemoryStore) -> (FulfillmentService<MemoryStore>, MemoryStore) {
    let service = FulfillmentService::new(Arc::new(store.clone()), ScoringConfig::default());
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
