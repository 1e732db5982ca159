//! Device location providers.
//!
//! A provider answers one question: where is the device right now?
//! Each source kind has its own submodule. When no source is configured
//! there is no provider at all, and reporting becomes a no-op.

mod command;
mod fixed;

pub use command::CommandProvider;
pub use fixed::FixedProvider;

use async_trait::async_trait;

use crate::model::{PositionOptions, PositionSample, ProviderError};

/// The device location capability.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the capability can be used at all on this device.
    fn is_available(&self) -> bool {
        true
    }

    /// Acquire a single position sample.
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<PositionSample, ProviderError>;
}

/// Where position samples come from, as configured.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    /// A fixed coordinate.
    Fixed(PositionSample),

    /// A helper command that prints a JSON fix: program followed by its arguments.
    Command(Vec<String>),
}

/// Build the provider for a configured source, if any.
pub fn provider_for(source: Option<LocationSource>) -> Option<Box<dyn LocationProvider>> {
    match source? {
        LocationSource::Fixed(sample) => Some(Box::new(FixedProvider::new(sample))),
        LocationSource::Command(argv) => {
            CommandProvider::from_argv(&argv).map(|p| Box::new(p) as Box<dyn LocationProvider>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_source_means_no_provider() {
        assert!(provider_for(None).is_none());
    }

    #[test]
    fn empty_command_means_no_provider() {
        assert!(provider_for(Some(LocationSource::Command(Vec::new()))).is_none());
    }

    #[tokio::test]
    async fn fixed_source_yields_its_coordinate() {
        let sample = PositionSample::new(51.5, -0.12).unwrap();
        let provider = provider_for(Some(LocationSource::Fixed(sample))).unwrap();

        assert!(provider.is_available());
        let got = provider
            .current_position(&PositionOptions::default())
            .await
            .unwrap();
        assert_eq!(got, sample);
    }
}
