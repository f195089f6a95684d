use super::super::domain::{FulfillmentScore, LifeAreaStatus};

/// Lower bounds are inclusive.
const BANDS: [(f64, LifeAreaStatus); 4] = [
    (90.0, LifeAreaStatus::Flourishing),
    (70.0, LifeAreaStatus::Thriving),
    (40.0, LifeAreaStatus::Balanced),
    (20.0, LifeAreaStatus::Struggling),
];

pub fn classify(score: FulfillmentScore) -> LifeAreaStatus {
    let value = score.value();
    BANDS
        .iter()
        .find(|(floor, _)| value >= *floor)
        .map(|(_, status)| *status)
        .unwrap_or(LifeAreaStatus::Crisis)
}
