//! Fulfillment scoring for life areas.
//!
//! The calculator is a pure function over already-fetched events, commitments and
//! boundaries. [`FulfillmentService`] threads a [`LifeAreaStore`] around it for single and
//! batch recalculation, and [`scoring_router`] exposes both over HTTP.

pub mod calculator;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use calculator::{
    FulfillmentCalculator, ScoreBreakdown, ScoreComponent, ScoreFactor, ScoreResult,
};
pub use domain::{
    Boundary, Commitment, CommitmentStatus, Event, EventType, FulfillmentScore, LifeArea,
    LifeAreaId, LifeAreaStatus, LifeAreaView,
};
pub use repository::{LifeAreaStore, StoreError};
pub use router::{scoring_router, ScorePreviewRequest, ScoreResultView};
pub use service::{
    FulfillmentService, RecalculatedLifeArea, RecalculationFailure, RecalculationSummary,
    ScoringServiceError,
};
