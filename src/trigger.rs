//! The startup trigger for an emergency report.
//!
//! The hosting page asks for a report by carrying `request_location=true`
//! in its address. That address is read once, at startup, and turned into
//! a [`Trigger`] handed to the reporter.

use std::time::Duration;

use reqwest::Url;

/// Query parameter that requests a report.
pub const REQUEST_LOCATION_PARAM: &str = "request_location";

/// Pause between page load and acquisition, letting the page settle.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    armed: bool,
    delay: Duration,
}

impl Trigger {
    /// Evaluate a page address.
    ///
    /// Accepts a full URL, a path with a query, or a bare query string
    /// with or without its leading `?`.
    pub fn from_page(page: &str, delay: Duration) -> Self {
        Self {
            armed: requests_location(page),
            delay,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

fn requests_location(page: &str) -> bool {
    let Some(url) = page_url(page) else {
        return false;
    };
    url.query_pairs()
        .any(|(key, value)| key == REQUEST_LOCATION_PARAM && value == "true")
}

fn page_url(page: &str) -> Option<Url> {
    if let Ok(url) = Url::parse(page) {
        return Some(url);
    }
    let base = Url::parse("http://page.invalid/").ok()?;
    if page.contains('?') || page.starts_with('/') {
        base.join(page).ok()
    } else {
        base.join(&format!("?{page}")).ok()
    }
}
