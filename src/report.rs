//! Emergency location reporting.
//!
//! One report is a straight line: acquire a position, POST it to the
//! endpoint, read the verdict, tell the user if it worked. Every failure
//! ends the attempt where it happens. Nothing is retried or queued, and
//! nothing propagates past [`Reporter::report_location`].

use reqwest::Url;
use tracing::{debug, error, info};

use crate::locate::LocationProvider;
use crate::model::{
    PositionOptions, PositionSample, ReportError, ReportOutcome, ShareLocationResponse,
};
use crate::notify::{LOCATION_SHARED, Notifier};
use crate::trigger::Trigger;

/// Endpoint path, resolved against the configured origin.
pub const SHARE_LOCATION_PATH: &str = "/share-location";

pub struct Reporter {
    client: reqwest::Client,
    share_location_url: Url,
    provider: Option<Box<dyn LocationProvider>>,
    notifier: Box<dyn Notifier>,
    options: PositionOptions,
}

impl Reporter {
    /// Creates a reporter posting to `SHARE_LOCATION_PATH` on `endpoint`.
    ///
    /// `provider` is `None` when the device has no location capability.
    pub fn new(
        endpoint: &Url,
        provider: Option<Box<dyn LocationProvider>>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, String> {
        let share_location_url = endpoint
            .join(SHARE_LOCATION_PATH)
            .map_err(|e| format!("invalid endpoint {endpoint}: {e}"))?;

        Ok(Self {
            // No request timeout: the only bound is the provider's.
            client: reqwest::Client::new(),
            share_location_url,
            provider,
            notifier,
            options: PositionOptions::default(),
        })
    }

    pub fn share_location_url(&self) -> &Url {
        &self.share_location_url
    }

    /// Report once if the trigger is armed, after its delay.
    ///
    /// Returns `None` when the trigger is not armed.
    pub async fn run_trigger(&self, trigger: Trigger) -> Option<ReportOutcome> {
        if !trigger.is_armed() {
            debug!("location not requested by page");
            return None;
        }
        debug!(delay = ?trigger.delay(), "location requested by page");
        tokio::time::sleep(trigger.delay()).await;
        self.report_location().await
    }

    /// Acquire one position and share it.
    ///
    /// Returns `None`, silently, when the location capability is missing.
    /// Otherwise the outcome has already been logged, and on success the
    /// user has been alerted.
    pub async fn report_location(&self) -> Option<ReportOutcome> {
        let provider = self.provider.as_deref().filter(|p| p.is_available())?;

        let outcome = match provider.current_position(&self.options).await {
            Ok(sample) => self.share(sample).await,
            Err(e) => ReportOutcome::Failure(e.into()),
        };

        match &outcome {
            ReportOutcome::Success => {
                info!("location shared with emergency contact");
                self.notifier.alert(LOCATION_SHARED);
            }
            ReportOutcome::Failure(e) => error!("{e}"),
        }

        Some(outcome)
    }

    async fn share(&self, sample: PositionSample) -> ReportOutcome {
        debug!(
            url = %self.share_location_url(),
            latitude = sample.latitude(),
            longitude = sample.longitude(),
            "sending location"
        );
        match self.post(sample).await {
            Ok(response) => response.into_outcome(),
            Err(e) => ReportOutcome::Failure(ReportError::Transmission(e)),
        }
    }

    /// The body is decoded whatever the status code.
    async fn post(&self, sample: PositionSample) -> Result<ShareLocationResponse, reqwest::Error> {
        self.client
            .post(self.share_location_url.clone())
            .json(&sample)
            .send()
            .await?
            .json()
            .await
    }
}
