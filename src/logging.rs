//! Diagnostic logging.
//!
//! Events go to stderr through `tracing-subscriber`. `BEACON_LOG` sets the
//! filter (default `info`), and `BEACON_LOG_JSON=1` switches to JSON lines.

use std::{env, io};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const FILTER_ENV: &str = "BEACON_LOG";
pub const JSON_ENV: &str = "BEACON_LOG_JSON";

pub fn init() {
    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var(JSON_ENV).is_ok_and(|v| is_enabled(&v));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
