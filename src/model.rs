//! Core data model for Beacon.
//!
//! A report attempt captures one position sample and ends in one outcome.
//! Neither outlives the attempt.

mod outcome;
mod position;

pub use outcome::{ReportError, ReportOutcome, ShareLocationResponse};
pub use position::{PositionOptions, PositionSample, ProviderError};
