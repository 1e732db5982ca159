//! CLI interface for Beacon.
//!
//! Two ways in:
//!
//! - `beacon page-load <PAGE_URL>`: the page-load hook. Reports only when
//!   the address carries `request_location=true`, after a short delay.
//! - `beacon report`: report right now.
//!
//! Report failures are logged, never returned: the flow always exits 0
//! once it has run. Only usage and configuration problems exit non-zero.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::config::Config;
use crate::locate::{self, LocationSource};
use crate::model::PositionSample;
use crate::notify::TerminalNotifier;
use crate::report::Reporter;
use crate::trigger::Trigger;

/// Beacon: share your location with your emergency contact.
#[derive(Debug, Parser)]
#[command(name = "beacon", version, after_long_help = USAGE_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const USAGE_HELP: &str = r#"Examples:
  beacon page-load "http://127.0.0.1:5000/dashboard?request_location=true" --at 40.0,-75.0
  beacon report --location-command "termux-location -p gps"
  BEACON_ENDPOINT=https://haven.example beacon report --at 51.5,-0.12

Configuration lives in ~/.beacon/config.toml (see `beacon config path`)."#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a page address and report if it requests the location.
    PageLoad {
        /// Address of the page that just loaded (URL, path, or query string).
        page: String,

        /// Pause before acquiring a position, in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Acquire a position and report it now.
    Report {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path.
    Path,
}

/// Options shared by every command that reports.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Origin of the app serving `/share-location`.
    #[arg(long)]
    endpoint: Option<String>,

    /// Report this fixed coordinate.
    #[arg(
        long,
        value_name = "LAT,LON",
        allow_hyphen_values = true,
        conflicts_with = "location_command"
    )]
    at: Option<PositionSample>,

    /// Helper command that prints a JSON fix (split on whitespace).
    #[arg(long, value_name = "CMD")]
    location_command: Option<String>,
}

impl ReportArgs {
    /// Flags override the configured source.
    fn location_source(&self, config: &Config) -> Result<Option<LocationSource>, String> {
        if let Some(sample) = self.at {
            return Ok(Some(LocationSource::Fixed(sample)));
        }
        if let Some(cmd) = &self.location_command {
            let argv: Vec<String> = cmd.split_whitespace().map(String::from).collect();
            if argv.is_empty() {
                return Err("--location-command is empty".to_string());
            }
            return Ok(Some(LocationSource::Command(argv)));
        }
        config.location_source()
    }

    fn reporter(&self, config: &Config) -> Result<Reporter, String> {
        let endpoint = config.resolve_endpoint(self.endpoint.as_deref())?;
        let provider = locate::provider_for(self.location_source(config)?);
        Reporter::new(&endpoint, provider, Box::new(TerminalNotifier))
    }
}

/// Run the CLI, returning an error message on failure.
pub async fn run(cli: Cli, config: &Config) -> Result<(), String> {
    match cli.command {
        Command::PageLoad {
            page,
            delay_ms,
            report,
        } => {
            let delay = delay_ms.map_or_else(|| config.trigger_delay(), Duration::from_millis);
            let trigger = Trigger::from_page(&page, delay);
            let reporter = report.reporter(config)?;
            let outcome = reporter.run_trigger(trigger).await;
            debug!(shared = outcome.is_some_and(|o| o.is_success()), "page-load finished");
            Ok(())
        }
        Command::Report { report } => {
            let outcome = report.reporter(config)?.report_location().await;
            debug!(shared = outcome.is_some_and(|o| o.is_success()), "report finished");
            Ok(())
        }
        Command::Config {
            command: ConfigCommand::Path,
        } => {
            let path = Config::path().ok_or("could not determine home directory")?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
