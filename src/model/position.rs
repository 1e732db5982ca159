//! Position types: one device reading and how to ask for it.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

/// A single latitude/longitude reading from the device.
///
/// Captured once per report attempt and never changed afterwards.
/// Serializes to exactly the body the share-location endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionSample {
    latitude: f64,
    longitude: f64,
}

impl PositionSample {
    /// Creates a sample, rejecting coordinates outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude out of range: {latitude}"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude out of range: {longitude}"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for PositionSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// Parses `LAT,LON`, as accepted by `--at`.
impl FromStr for PositionSample {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LON, got '{s}'"))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude '{}': {e}", lat.trim()))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude '{}': {e}", lon.trim()))?;
        Self::new(latitude, longitude)
    }
}

/// How a position sample should be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Prefer the most precise source the device has (GPS over network).
    pub high_accuracy: bool,

    /// Upper bound on how long acquisition may take.
    pub timeout: Duration,

    /// Oldest cached reading the device may hand back instead of a fresh one.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

/// Why the device could not produce a position sample.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}
