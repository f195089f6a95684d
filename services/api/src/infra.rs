use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use wisdom_score::scoring::{
    Boundary, Commitment, Event, FulfillmentScore, LifeArea, LifeAreaId, LifeAreaStatus,
    LifeAreaStore, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

struct LifeAreaRecords {
    life_area: LifeArea,
    events: Vec<Event>,
    commitments: Vec<Commitment>,
    boundaries: Vec<Boundary>,
}

/// Process-local store backing the demo and the default server.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLifeAreaStore {
    records: Arc<Mutex<BTreeMap<LifeAreaId, LifeAreaRecords>>>,
}

impl InMemoryLifeAreaStore {
    pub(crate) fn insert_life_area(&self, life_area: LifeArea) {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let entry = guard
            .entry(life_area.id.clone())
            .or_insert_with(|| LifeAreaRecords {
                life_area: life_area.clone(),
                events: Vec::new(),
                commitments: Vec::new(),
                boundaries: Vec::new(),
            });
        entry.life_area = life_area;
    }

    pub(crate) fn record_event(&self, event: Event) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let records = guard
            .get_mut(&event.life_area_id)
            .ok_or(StoreError::NotFound)?;
        records.events.push(event);
        Ok(())
    }

    pub(crate) fn record_commitment(&self, commitment: Commitment) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let records = guard
            .get_mut(&commitment.life_area_id)
            .ok_or(StoreError::NotFound)?;
        records.commitments.push(commitment);
        Ok(())
    }

    pub(crate) fn record_boundary(&self, boundary: Boundary) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let records = guard
            .get_mut(&boundary.life_area_id)
            .ok_or(StoreError::NotFound)?;
        records.boundaries.push(boundary);
        Ok(())
    }
}

impl LifeAreaStore for InMemoryLifeAreaStore {
    fn list_life_area_ids(&self) -> Result<Vec<LifeAreaId>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.keys().cloned().collect())
    }

    fn fetch_life_area(&self, id: &LifeAreaId) -> Result<Option<LifeArea>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).map(|records| records.life_area.clone()))
    }

    fn fetch_recent_events(
        &self,
        id: &LifeAreaId,
        since: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let records = guard.get(id).ok_or(StoreError::NotFound)?;
        let mut events: Vec<Event> = records
            .events
            .iter()
            .filter(|event| event.occurred_at >= since)
            .cloned()
            .collect();
        events.sort_by(|left, right| right.occurred_at.cmp(&left.occurred_at));
        Ok(events)
    }

    fn fetch_commitments(&self, id: &LifeAreaId) -> Result<Vec<Commitment>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let records = guard.get(id).ok_or(StoreError::NotFound)?;
        Ok(records.commitments.clone())
    }

    fn fetch_boundaries(&self, id: &LifeAreaId) -> Result<Vec<Boundary>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let records = guard.get(id).ok_or(StoreError::NotFound)?;
        Ok(records.boundaries.clone())
    }

    fn persist_score(
        &self,
        id: &LifeAreaId,
        score: FulfillmentScore,
        status: LifeAreaStatus,
        scored_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let records = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        if score.status() != status {
            return Err(StoreError::Malformed(format!(
                "status {} disagrees with score {score}",
                status.label()
            )));
        }
        records.life_area.apply_score(score, scored_at);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
