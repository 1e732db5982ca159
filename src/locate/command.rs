//! Command provider: ask a helper program for a fix.
//!
//! The helper prints a JSON object with at least `latitude` and `longitude`
//! on stdout and exits zero. Other fields are ignored, so tools like
//! `termux-location` work unchanged. Acquisition options are passed in the
//! environment:
//!
//! - `BEACON_HIGH_ACCURACY`: `1` or `0`
//! - `BEACON_TIMEOUT_MS`
//! - `BEACON_MAXIMUM_AGE_MS`
//!
//! The timeout is also enforced here: a helper still running when it
//! elapses is killed.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::{env, io};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::LocationProvider;
use crate::model::{PositionOptions, PositionSample, ProviderError};

#[derive(Debug, Clone)]
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
}

/// The part of the helper's output we read.
#[derive(Deserialize)]
struct HelperFix {
    latitude: f64,
    longitude: f64,
}

impl CommandProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a full argv (program first). `None` when empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    /// Locate the helper binary, either as given or via `PATH`.
    fn resolve_program(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 {
            return is_executable(program).then(|| program.to_path_buf());
        }
        let paths = env::var_os("PATH")?;
        env::split_paths(&paths)
            .map(|dir| dir.join(program))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[async_trait]
impl LocationProvider for CommandProvider {
    fn is_available(&self) -> bool {
        self.resolve_program().is_some()
    }

    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<PositionSample, ProviderError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .env(
                "BEACON_HIGH_ACCURACY",
                if options.high_accuracy { "1" } else { "0" },
            )
            .env("BEACON_TIMEOUT_MS", options.timeout.as_millis().to_string())
            .env(
                "BEACON_MAXIMUM_AGE_MS",
                options.maximum_age.as_millis().to_string(),
            )
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(options.timeout, command.output())
            .await
            .map_err(|_| ProviderError::Timeout(options.timeout))?
            .map_err(|e| spawn_error(&self.program, &e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.to_lowercase().contains("permission") {
                return Err(ProviderError::PermissionDenied);
            }
            return Err(ProviderError::PositionUnavailable(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        parse_fix(&output.stdout)
    }
}

/// A helper that won't start is a broken install, never a location
/// permission refusal.
fn spawn_error(program: &str, e: &io::Error) -> ProviderError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        ProviderError::PositionUnavailable(format!("cannot execute {program}: {e}"))
    } else {
        ProviderError::PositionUnavailable(format!("failed to run {program}: {e}"))
    }
}

fn parse_fix(stdout: &[u8]) -> Result<PositionSample, ProviderError> {
    let fix: HelperFix = serde_json::from_slice(stdout)
        .map_err(|e| ProviderError::PositionUnavailable(format!("unreadable fix: {e}")))?;
    PositionSample::new(fix.latitude, fix.longitude).map_err(ProviderError::PositionUnavailable)
}
