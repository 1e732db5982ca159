//! Beacon configuration.
//!
//! Loaded from `~/.beacon/config.toml`. Every key is optional and a
//! missing file means defaults. Settings are resolved through a chain:
//!
//! 1. command-line flag: explicit per-invocation override
//! 2. environment variable (`BEACON_ENDPOINT` for the endpoint)
//! 3. `~/.beacon/config.toml`
//! 4. built-in default

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use reqwest::Url;
use serde::Deserialize;

use crate::locate::LocationSource;
use crate::model::PositionSample;
use crate::trigger;

/// Origin of the app serving `/share-location` when nothing else is set.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Environment override for the endpoint.
pub const ENDPOINT_ENV: &str = "BEACON_ENDPOINT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Origin of the reporting endpoint.
    pub endpoint: Option<String>,

    /// Pause between page load and acquisition.
    pub trigger_delay_ms: Option<u64>,

    /// Where position samples come from.
    #[serde(default)]
    pub location: LocationConfig,
}

/// The `[location]` table: a fixed coordinate or a helper command.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub command: Option<Vec<String>>,
}

impl Config {
    /// Load config from `~/.beacon/config.toml`, or defaults if absent.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file, or defaults if it doesn't exist.
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.beacon/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".beacon").join("config.toml"))
    }

    /// Resolve the endpoint origin: flag, then `BEACON_ENDPOINT`, then file.
    pub fn resolve_endpoint(&self, explicit: Option<&str>) -> Result<Url, String> {
        let from_env = env::var(ENDPOINT_ENV).ok();
        self.endpoint_from(explicit, from_env.as_deref())
    }

    fn endpoint_from(&self, explicit: Option<&str>, from_env: Option<&str>) -> Result<Url, String> {
        let raw = explicit
            .or(from_env.filter(|s| !s.is_empty()))
            .or(self.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT);

        let url = Url::parse(raw).map_err(|e| format!("invalid endpoint '{raw}': {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("endpoint must be http or https: {raw}"));
        }
        Ok(url)
    }

    pub fn trigger_delay(&self) -> Duration {
        self.trigger_delay_ms
            .map_or(trigger::DEFAULT_DELAY, Duration::from_millis)
    }

    /// The configured location source. `None` means no location capability.
    pub fn location_source(&self) -> Result<Option<LocationSource>, String> {
        let LocationConfig {
            latitude,
            longitude,
            command,
        } = &self.location;

        let fixed = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(
                PositionSample::new(*lat, *lon).map_err(|e| format!("[location] {e}"))?,
            ),
            (None, None) => None,
            _ => return Err("[location] needs both latitude and longitude".to_string()),
        };

        let command = command.as_ref().filter(|argv| !argv.is_empty());

        match (fixed, command) {
            (Some(_), Some(_)) => {
                Err("[location] sets both a coordinate and a command; pick one".to_string())
            }
            (Some(sample), None) => Ok(Some(LocationSource::Fixed(sample))),
            (None, Some(argv)) => Ok(Some(LocationSource::Command(argv.clone()))),
            (None, None) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn parse(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_path(&dir.path().join("config.toml")).unwrap();

        assert!(config.endpoint.is_none());
        assert_eq!(config.trigger_delay(), Duration::from_millis(1000));
        assert_eq!(config.location_source().unwrap(), None);
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "endpoint = \"https://haven.example\"\ntrigger-delay-ms = 250\n",
        )
        .unwrap();

        let config = Config::from_path(&path).unwrap();

        assert_eq!(config.endpoint.as_deref(), Some("https://haven.example"));
        assert_eq!(config.trigger_delay(), Duration::from_millis(250));
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "endpoint = ").unwrap();

        let err = Config::from_path(&path).unwrap_err();
        assert!(err.contains("invalid config"));
        assert!(err.contains("config.toml"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(toml::from_str::<Config>("endpont = \"http://x\"").is_err());
    }

    // ── Endpoint resolution ──

    #[test]
    fn explicit_endpoint_wins() {
        let config = parse("endpoint = \"http://file.example\"");
        let url = config
            .endpoint_from(Some("http://flag.example"), Some("http://env.example"))
            .unwrap();

        assert_eq!(url.host_str(), Some("flag.example"));
    }

    #[test]
    fn env_endpoint_beats_file() {
        let config = parse("endpoint = \"http://file.example\"");
        let url = config
            .endpoint_from(None, Some("http://env.example"))
            .unwrap();

        assert_eq!(url.host_str(), Some("env.example"));
    }

    #[test]
    fn empty_env_falls_through_to_file() {
        let config = parse("endpoint = \"http://file.example\"");
        let url = config.endpoint_from(None, Some("")).unwrap();

        assert_eq!(url.host_str(), Some("file.example"));
    }

    #[test]
    fn default_endpoint_is_local_app() {
        let url = Config::default().endpoint_from(None, None).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let err = Config::default()
            .endpoint_from(Some("ftp://haven.example"), None)
            .unwrap_err();
        assert!(err.contains("http or https"));
    }

    // ── Location source ──

    #[test]
    fn fixed_coordinate_source() {
        let config = parse("[location]\nlatitude = 40.0\nlongitude = -75.0\n");

        assert_eq!(
            config.location_source().unwrap(),
            Some(LocationSource::Fixed(PositionSample::new(40.0, -75.0).unwrap()))
        );
    }

    #[test]
    fn command_source() {
        let config = parse("[location]\ncommand = [\"termux-location\", \"-p\", \"gps\"]\n");

        assert_eq!(
            config.location_source().unwrap(),
            Some(LocationSource::Command(vec![
                "termux-location".to_string(),
                "-p".to_string(),
                "gps".to_string(),
            ]))
        );
    }

    #[test]
    fn half_a_coordinate_is_an_error() {
        let config = parse("[location]\nlatitude = 40.0\n");
        assert!(config.location_source().is_err());
    }

    #[test]
    fn coordinate_and_command_conflict() {
        let config =
            parse("[location]\nlatitude = 40.0\nlongitude = -75.0\ncommand = [\"locate\"]\n");
        assert!(config.location_source().unwrap_err().contains("pick one"));
    }

    #[test]
    fn empty_command_means_no_source() {
        let config = parse("[location]\ncommand = []\n");
        assert_eq!(config.location_source().unwrap(), None);
    }
}
