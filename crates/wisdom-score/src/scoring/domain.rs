use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for life areas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LifeAreaId(pub String);

impl std::fmt::Display for LifeAreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Category of a journaled event. Only a few categories move the score directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Upset,
    Breakthrough,
    Milestone,
    Insight,
    Reflection,
    Gratitude,
    Setback,
}

impl EventType {
    pub fn is_upset(self) -> bool {
        matches!(self, EventType::Upset)
    }

    pub fn is_breakthrough(self) -> bool {
        matches!(self, EventType::Breakthrough | EventType::Milestone)
    }
}

/// Timestamped occurrence captured by journaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub life_area_id: LifeAreaId,
    pub event_type: EventType,
    /// Signed intensity, roughly -5..=5.
    pub emotional_charge: i32,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitmentStatus {
    Active,
    Completed,
    Integrated,
    Paused,
    Broken,
}

impl CommitmentStatus {
    /// Completed and integrated commitments both count as kept.
    pub fn is_kept(self) -> bool {
        matches!(self, CommitmentStatus::Completed | CommitmentStatus::Integrated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    pub life_area_id: LifeAreaId,
    pub status: CommitmentStatus,
}

/// Personal limit with a cumulative violation counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    pub life_area_id: LifeAreaId,
    pub violation_count: u32,
}

/// Fulfillment score on the 0-100 scale. Construction clamps out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct FulfillmentScore(f64);

impl FulfillmentScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;
    pub const NEUTRAL: FulfillmentScore = FulfillmentScore(50.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn status(self) -> LifeAreaStatus {
        LifeAreaStatus::from_score(self)
    }
}

impl From<f64> for FulfillmentScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<FulfillmentScore> for f64 {
    fn from(score: FulfillmentScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for FulfillmentScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Band derived from the current score; never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifeAreaStatus {
    Crisis,
    Struggling,
    Balanced,
    Thriving,
    Flourishing,
}

impl LifeAreaStatus {
    pub fn from_score(score: FulfillmentScore) -> Self {
        super::calculator::classify(score)
    }

    pub fn label(self) -> &'static str {
        match self {
            LifeAreaStatus::Crisis => "CRISIS",
            LifeAreaStatus::Struggling => "STRUGGLING",
            LifeAreaStatus::Balanced => "BALANCED",
            LifeAreaStatus::Thriving => "THRIVING",
            LifeAreaStatus::Flourishing => "FLOURISHING",
        }
    }
}

/// Aggregate root carrying the derived score fields.
///
/// `current_score`, `status` and `scored_at` change only through [`LifeArea::apply_score`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeArea {
    pub id: LifeAreaId,
    pub name: String,
    current_score: FulfillmentScore,
    status: LifeAreaStatus,
    scored_at: Option<DateTime<Utc>>,
}

impl LifeArea {
    /// New life areas start at the neutral midpoint until their first recalculation.
    pub fn new(id: LifeAreaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            current_score: FulfillmentScore::NEUTRAL,
            status: FulfillmentScore::NEUTRAL.status(),
            scored_at: None,
        }
    }

    pub fn current_score(&self) -> FulfillmentScore {
        self.current_score
    }

    pub fn status(&self) -> LifeAreaStatus {
        self.status
    }

    pub fn scored_at(&self) -> Option<DateTime<Utc>> {
        self.scored_at
    }

    /// Overwrites the derived fields; stores call this from `persist_score` only.
    pub fn apply_score(&mut self, score: FulfillmentScore, scored_at: DateTime<Utc>) {
        self.current_score = score;
        self.status = score.status();
        self.scored_at = Some(scored_at);
    }

    pub fn view(&self) -> LifeAreaView {
        LifeAreaView {
            life_area_id: self.id.clone(),
            name: self.name.clone(),
            current_score: self.current_score.value(),
            status: self.status.label(),
            scored_at: self.scored_at,
        }
    }
}

/// Serialized representation of a life area for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct LifeAreaView {
    pub life_area_id: LifeAreaId,
    pub name: String,
    pub current_score: f64,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scored_at: Option<DateTime<Utc>>,
}
