//! Outcome types: how a single report attempt ended.

use serde::Deserialize;

use super::position::ProviderError;

/// Why a report attempt did not complete.
///
/// The `Display` form is the diagnostic line written to the log.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("geolocation error: {0}")]
    Provider(#[from] ProviderError),

    /// The POST could not be sent or its response could not be decoded.
    #[error("error sharing location: {0}")]
    Transmission(#[from] reqwest::Error),

    /// The endpoint answered with `success: false`.
    #[error("failed to share location: {0}")]
    ServerRejected(String),
}

/// The result of one report attempt. Consumed once, then discarded.
#[derive(Debug)]
pub enum ReportOutcome {
    Success,
    Failure(ReportError),
}

impl ReportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Decoded body of a share-location response.
///
/// A missing `success` field counts as a rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareLocationResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub error: Option<String>,
}

impl ShareLocationResponse {
    pub fn into_outcome(self) -> ReportOutcome {
        if self.success {
            ReportOutcome::Success
        } else {
            let reason = self.error.unwrap_or_else(|| "no reason given".to_string());
            ReportOutcome::Failure(ReportError::ServerRejected(reason))
        }
    }
}
