use super::common::*;
use crate::scoring::calculator::classify;
use crate::scoring::domain::{CommitmentStatus, EventType, FulfillmentScore, LifeAreaStatus};
use crate::scoring::{FulfillmentCalculator, ScoreFactor};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn empty_life_area_scores_neutral_and_balanced() {
    let result = FulfillmentCalculator::new().calculate(&[], &[], &[]);

    assert_eq!(result.score.value(), 50.0);
    assert_eq!(result.status, LifeAreaStatus::Balanced);
    assert_eq!(result.events_considered, 0);
    assert_eq!(result.breakdown.event_momentum, 0.0);
    assert_eq!(result.breakdown.commitment_integrity, 0.0);
    assert_eq!(result.breakdown.boundary_penalty, 0.0);
    assert_eq!(result.breakdown.upset_penalty, 0.0);
    assert_eq!(result.breakdown.breakthrough_bonus, 0.0);
}

#[test]
fn single_max_charge_event_adds_ten_points_of_momentum() {
    let events = vec![event(EventType::Reflection, 5, 1)];

    let result = FulfillmentCalculator::new().calculate(&events, &[], &[]);

    assert_close(result.breakdown.event_momentum, 10.0);
    assert_eq!(result.score.value(), 60.0);
}

#[test]
fn momentum_discounts_older_events() {
    let events = vec![
        event(EventType::Insight, 5, 1),
        event(EventType::Setback, -5, 30),
    ];

    let result = FulfillmentCalculator::new().calculate(&events, &[], &[]);

    // 10 * 1.0 + (-10) * 0.75 over a weight sum of 1.75
    assert_close(result.breakdown.event_momentum, 2.5 / 1.75);
    assert_eq!(result.score.value(), 51.4);
}

#[test]
fn momentum_orders_events_most_recent_first() {
    let calculator = FulfillmentCalculator::new();
    let sorted = vec![
        event(EventType::Insight, 5, 1),
        event(EventType::Setback, -5, 30),
    ];
    let reversed = vec![
        event(EventType::Setback, -5, 30),
        event(EventType::Insight, 5, 1),
    ];

    let expected = calculator.calculate(&sorted, &[], &[]);
    let actual = calculator.calculate(&reversed, &[], &[]);

    assert_eq!(expected, actual);
}

#[test]
fn momentum_is_clamped_to_twenty() {
    let positive = vec![event(EventType::Gratitude, 15, 2)];
    let negative = vec![event(EventType::Setback, -15, 2)];
    let calculator = FulfillmentCalculator::new();

    assert_close(
        calculator.calculate(&positive, &[], &[]).breakdown.event_momentum,
        20.0,
    );
    assert_close(
        calculator.calculate(&negative, &[], &[]).breakdown.event_momentum,
        -20.0,
    );
}

#[test]
fn commitment_mix_scenario_rounds_to_one_decimal() {
    let commitments = vec![
        commitment(CommitmentStatus::Completed),
        commitment(CommitmentStatus::Active),
        commitment(CommitmentStatus::Active),
    ];

    let result = FulfillmentCalculator::new().calculate(&[], &commitments, &[]);

    assert_close(result.breakdown.commitment_integrity, 10.0 / 3.0 + 4.0);
    assert_eq!(result.score.value(), 57.3);
    assert_eq!(result.status, LifeAreaStatus::Balanced);
}

#[test]
fn integrated_commitments_count_as_kept() {
    let commitments = vec![
        commitment(CommitmentStatus::Integrated),
        commitment(CommitmentStatus::Broken),
    ];

    let result = FulfillmentCalculator::new().calculate(&[], &commitments, &[]);

    assert_close(result.breakdown.commitment_integrity, 5.0);
}

#[test]
fn active_engagement_bonus_caps_at_five() {
    let commitments = vec![
        commitment(CommitmentStatus::Active),
        commitment(CommitmentStatus::Active),
        commitment(CommitmentStatus::Active),
        commitment(CommitmentStatus::Active),
        commitment(CommitmentStatus::Paused),
    ];

    let result = FulfillmentCalculator::new().calculate(&[], &commitments, &[]);

    assert_close(result.breakdown.commitment_integrity, 5.0);
}

#[test]
fn boundary_penalty_scales_until_cap() {
    let calculator = FulfillmentCalculator::new();

    let single = calculator.calculate(&[], &[], &[boundary(1)]);
    assert_close(single.breakdown.boundary_penalty, 10.0);

    let at_cap = calculator.calculate(&[], &[], &[boundary(2), boundary(1)]);
    assert_close(at_cap.breakdown.boundary_penalty, 30.0);

    let ten_boundaries: Vec<_> = (0..10).map(|_| boundary(1)).collect();
    let beyond_cap = calculator.calculate(&[], &[], &ten_boundaries);
    assert_close(beyond_cap.breakdown.boundary_penalty, 30.0);
    assert_eq!(beyond_cap.score.value(), 20.0);
}

#[test]
fn upset_penalty_holds_at_cap() {
    let calculator = FulfillmentCalculator::new();
    let five: Vec<_> = (0..5).map(|day| event(EventType::Upset, 0, day)).collect();
    let six: Vec<_> = (0..6).map(|day| event(EventType::Upset, 0, day)).collect();

    assert_close(calculator.calculate(&five, &[], &[]).breakdown.upset_penalty, 20.0);
    assert_close(calculator.calculate(&six, &[], &[]).breakdown.upset_penalty, 20.0);
}

#[test]
fn breakthroughs_and_milestones_share_a_bonus_cap() {
    let calculator = FulfillmentCalculator::new();
    let one = vec![event(EventType::Milestone, 0, 3)];
    let three = vec![
        event(EventType::Breakthrough, 0, 1),
        event(EventType::Milestone, 0, 2),
        event(EventType::Breakthrough, 0, 3),
    ];

    assert_close(
        calculator.calculate(&one, &[], &[]).breakdown.breakthrough_bonus,
        15.0,
    );
    assert_close(
        calculator.calculate(&three, &[], &[]).breakdown.breakthrough_bonus,
        30.0,
    );
}

#[test]
fn final_score_is_clamped_under_extreme_inputs() {
    let calculator = FulfillmentCalculator::new();

    let grim: Vec<_> = (0..10).map(|day| event(EventType::Upset, -5, day)).collect();
    let low = calculator.calculate(&grim, &[], &[boundary(100)]);
    assert!(low.breakdown.raw_total() < 0.0);
    assert_eq!(low.score.value(), 0.0);
    assert_eq!(low.status, LifeAreaStatus::Crisis);

    let bright: Vec<_> = (0..3)
        .map(|day| event(EventType::Breakthrough, 20, day))
        .collect();
    let high = calculator.calculate(
        &bright,
        &[commitment(CommitmentStatus::Completed)],
        &[],
    );
    assert!(high.breakdown.raw_total() > 100.0);
    assert_eq!(high.score.value(), 100.0);
    assert_eq!(high.status, LifeAreaStatus::Flourishing);
}

#[test]
fn recalculating_the_same_snapshot_is_stable() {
    let calculator = FulfillmentCalculator::new();
    let events = vec![
        event(EventType::Upset, -3, 4),
        event(EventType::Breakthrough, 4, 10),
    ];
    let commitments = vec![commitment(CommitmentStatus::Active)];
    let boundaries = vec![boundary(1)];

    let first = calculator.calculate(&events, &commitments, &boundaries);
    let second = calculator.calculate(&events, &commitments, &boundaries);

    assert_eq!(first, second);
}

#[test]
fn components_sum_to_raw_total() {
    let events = vec![
        event(EventType::Upset, -2, 1),
        event(EventType::Milestone, 3, 5),
    ];
    let result = FulfillmentCalculator::new().calculate(
        &events,
        &[commitment(CommitmentStatus::Completed)],
        &[boundary(1)],
    );

    let components = result.breakdown.components();
    assert_eq!(components.len(), 6);
    assert_eq!(components[0].factor, ScoreFactor::Base);
    assert!(components
        .iter()
        .any(|component| component.factor == ScoreFactor::BoundaryPenalty
            && component.contribution < 0.0));

    let sum: f64 = components.iter().map(|component| component.contribution).sum();
    assert_close(sum, result.breakdown.raw_total());
}

#[test]
fn status_bands_use_inclusive_lower_bounds() {
    let cases = [
        (0.0, LifeAreaStatus::Crisis),
        (19.9, LifeAreaStatus::Crisis),
        (20.0, LifeAreaStatus::Struggling),
        (39.9, LifeAreaStatus::Struggling),
        (40.0, LifeAreaStatus::Balanced),
        (69.9, LifeAreaStatus::Balanced),
        (70.0, LifeAreaStatus::Thriving),
        (89.9, LifeAreaStatus::Thriving),
        (90.0, LifeAreaStatus::Flourishing),
        (100.0, LifeAreaStatus::Flourishing),
    ];

    for (value, expected) in cases {
        assert_eq!(
            classify(FulfillmentScore::new(value)),
            expected,
            "score {value}"
        );
    }
}

#[test]
fn fulfillment_score_clamps_construction() {
    assert_eq!(FulfillmentScore::new(150.0).value(), 100.0);
    assert_eq!(FulfillmentScore::new(-3.5).value(), 0.0);
    assert_eq!(FulfillmentScore::new(f64::NAN).value(), 0.0);

    let parsed: FulfillmentScore = serde_json::from_str("120.5").expect("score parses");
    assert_eq!(parsed.value(), 100.0);
}
