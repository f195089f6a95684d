//! Fulfillment scoring for WisdomOS life areas.
//!
//! The [`scoring`] module holds the calculator, the storage seam and the batch
//! recalculation service. Configuration, telemetry and the application error type
//! are shared with the API binary.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
