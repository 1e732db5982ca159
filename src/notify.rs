//! User-visible notifications.

/// Shown once when the endpoint confirms the location was shared.
pub const LOCATION_SHARED: &str =
    "📍 Your live location has been shared with your emergency contact for safety.";

/// Somewhere to put a message the user must see.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Writes alerts to stdout, one per line. Diagnostics go to stderr,
/// so stdout carries nothing else.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        println!("{message}");
    }
}
