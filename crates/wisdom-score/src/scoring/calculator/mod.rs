mod rules;
mod status;

pub use status::classify;

use super::domain::{Boundary, Commitment, Event, FulfillmentScore, LifeAreaStatus};
use serde::{Deserialize, Serialize};

/// Stateless calculator turning a life area's records into a fulfillment score.
#[derive(Debug, Default, Clone, Copy)]
pub struct FulfillmentCalculator;

impl FulfillmentCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Scores the supplied records.
    ///
    /// `events` should already be limited to the trailing window. They are re-ordered
    /// most-recent-first before weighting; events sharing a timestamp keep their input order.
    pub fn calculate(
        &self,
        events: &[Event],
        commitments: &[Commitment],
        boundaries: &[Boundary],
    ) -> ScoreResult {
        let mut ordered: Vec<&Event> = events.iter().collect();
        ordered.sort_by(|left, right| right.occurred_at.cmp(&left.occurred_at));

        let breakdown = ScoreBreakdown {
            base: rules::BASE_SCORE,
            event_momentum: rules::event_momentum(&ordered),
            commitment_integrity: rules::commitment_integrity(commitments),
            boundary_penalty: rules::boundary_penalty(boundaries),
            upset_penalty: rules::upset_penalty(&ordered),
            breakthrough_bonus: rules::breakthrough_bonus(&ordered),
        };

        let clamped = FulfillmentScore::new(breakdown.raw_total());
        let score = FulfillmentScore::new(rules::round_to_tenth(clamped.value()));

        ScoreResult {
            score,
            status: score.status(),
            breakdown,
            events_considered: events.len(),
        }
    }
}

/// The five sub-scores on top of the base, kept for audits.
///
/// Penalties are stored as positive magnitudes and subtracted by [`ScoreBreakdown::raw_total`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub event_momentum: f64,
    pub commitment_integrity: f64,
    pub boundary_penalty: f64,
    pub upset_penalty: f64,
    pub breakthrough_bonus: f64,
}

impl ScoreBreakdown {
    /// Sum before clamping and rounding.
    pub fn raw_total(&self) -> f64 {
        self.base + self.event_momentum + self.commitment_integrity - self.boundary_penalty
            - self.upset_penalty
            + self.breakthrough_bonus
    }

    pub fn components(&self) -> Vec<ScoreComponent> {
        vec![
            ScoreComponent {
                factor: ScoreFactor::Base,
                contribution: self.base,
                notes: "neutral starting point".to_string(),
            },
            ScoreComponent {
                factor: ScoreFactor::EventMomentum,
                contribution: self.event_momentum,
                notes: format!("recency-weighted event charge {:+.1}", self.event_momentum),
            },
            ScoreComponent {
                factor: ScoreFactor::CommitmentIntegrity,
                contribution: self.commitment_integrity,
                notes: format!("kept and active commitments {:+.1}", self.commitment_integrity),
            },
            ScoreComponent {
                factor: ScoreFactor::BoundaryPenalty,
                contribution: -self.boundary_penalty,
                notes: format!("boundary violations -{:.1}", self.boundary_penalty),
            },
            ScoreComponent {
                factor: ScoreFactor::UpsetPenalty,
                contribution: -self.upset_penalty,
                notes: format!("recent upsets -{:.1}", self.upset_penalty),
            },
            ScoreComponent {
                factor: ScoreFactor::BreakthroughBonus,
                contribution: self.breakthrough_bonus,
                notes: format!(
                    "breakthroughs and milestones +{:.1}",
                    self.breakthrough_bonus
                ),
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Base,
    EventMomentum,
    CommitmentIntegrity,
    BoundaryPenalty,
    UpsetPenalty,
    BreakthroughBonus,
}

/// Signed contribution of one factor to the final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub contribution: f64,
    pub notes: String,
}

/// Calculator output: final score, derived band and the audit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: FulfillmentScore,
    pub status: LifeAreaStatus,
    pub breakdown: ScoreBreakdown,
    pub events_considered: usize,
}
