//! Fixed provider: always reports the same coordinate.
//!
//! Used on machines with no positioning hardware, where the operator
//! knows where the device is (a kiosk, a front desk).

use async_trait::async_trait;

use super::LocationProvider;
use crate::model::{PositionOptions, PositionSample, ProviderError};

#[derive(Debug, Clone)]
pub struct FixedProvider {
    sample: PositionSample,
}

impl FixedProvider {
    pub fn new(sample: PositionSample) -> Self {
        Self { sample }
    }
}

#[async_trait]
impl LocationProvider for FixedProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<PositionSample, ProviderError> {
        Ok(self.sample)
    }
}
