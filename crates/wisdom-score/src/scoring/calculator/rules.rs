use super::super::domain::{Boundary, Commitment, CommitmentStatus, Event};

pub(crate) const BASE_SCORE: f64 = 50.0;

const MOMENTUM_LIMIT: f64 = 20.0;
const CHARGE_MULTIPLIER: f64 = 2.0;
const OLDEST_EVENT_DISCOUNT: f64 = 0.5;

const COMPLETION_WEIGHT: f64 = 10.0;
const ACTIVE_BONUS_PER_COMMITMENT: f64 = 2.0;
const ACTIVE_BONUS_CAP: f64 = 5.0;

const PENALTY_PER_VIOLATION: f64 = 10.0;
const BOUNDARY_PENALTY_CAP: f64 = 30.0;

const PENALTY_PER_UPSET: f64 = 5.0;
const UPSET_PENALTY_CAP: f64 = 20.0;

const BONUS_PER_BREAKTHROUGH: f64 = 15.0;
const BREAKTHROUGH_BONUS_CAP: f64 = 30.0;

/// Recency-weighted average of charge-derived event scores.
///
/// `events` must be ordered most-recent-first: position `i` of `n` carries weight
/// `1 - (i / n) * 0.5`.
pub(crate) fn event_momentum(events: &[&Event]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }

    let total = events.len() as f64;
    let (weighted_sum, weight_sum) =
        events
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(weighted, weights), (index, event)| {
                let weight = 1.0 - (index as f64 / total) * OLDEST_EVENT_DISCOUNT;
                let event_score = f64::from(event.emotional_charge) * CHARGE_MULTIPLIER;
                (weighted + event_score * weight, weights + weight)
            });

    (weighted_sum / weight_sum).clamp(-MOMENTUM_LIMIT, MOMENTUM_LIMIT)
}

pub(crate) fn commitment_integrity(commitments: &[Commitment]) -> f64 {
    if commitments.is_empty() {
        return 0.0;
    }

    let kept = commitments
        .iter()
        .filter(|commitment| commitment.status.is_kept())
        .count();
    let active = commitments
        .iter()
        .filter(|commitment| commitment.status == CommitmentStatus::Active)
        .count();

    let completion_ratio = kept as f64 / commitments.len() as f64;
    let engagement = (active as f64 * ACTIVE_BONUS_PER_COMMITMENT).min(ACTIVE_BONUS_CAP);

    completion_ratio * COMPLETION_WEIGHT + engagement
}

pub(crate) fn boundary_penalty(boundaries: &[Boundary]) -> f64 {
    let violations: u64 = boundaries
        .iter()
        .map(|boundary| u64::from(boundary.violation_count))
        .sum();

    (violations as f64 * PENALTY_PER_VIOLATION).min(BOUNDARY_PENALTY_CAP)
}

pub(crate) fn upset_penalty(events: &[&Event]) -> f64 {
    let upsets = events
        .iter()
        .filter(|event| event.event_type.is_upset())
        .count();

    (upsets as f64 * PENALTY_PER_UPSET).min(UPSET_PENALTY_CAP)
}

pub(crate) fn breakthrough_bonus(events: &[&Event]) -> f64 {
    let breakthroughs = events
        .iter()
        .filter(|event| event.event_type.is_breakthrough())
        .count();

    (breakthroughs as f64 * BONUS_PER_BREAKTHROUGH).min(BREAKTHROUGH_BONUS_CAP)
}

/// One decimal place, half away from zero.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
