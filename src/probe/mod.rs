//! Media duration probing via an external inspection tool

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::error::{MovpressError, MovpressResult};

/// One-shot duration probe backed by `ffprobe`
///
/// Invokes the inspection tool configured to emit only the container's
/// total duration as plain decimal seconds on stdout, with diagnostic
/// noise suppressed.
pub struct DurationProbe {
    program: PathBuf,
}

impl DurationProbe {
    /// Create a probe using `ffprobe` from `PATH`
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("ffprobe"),
        }
    }

    /// Use a different inspection executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Total container duration of `path` in seconds
    pub fn duration_seconds(&self, path: &Path) -> MovpressResult<f64> {
        debug!("Probing duration of {}", path.display());

        let output = Command::new(&self.program)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .map_err(|e| MovpressError::Probe {
                path: path.display().to_string(),
                message: format!("failed to run {}: {}", self.program.display(), e),
            })?;

        if !output.status.success() {
            return Err(MovpressError::Probe {
                path: path.display().to_string(),
                message: format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_probe_duration(&stdout).ok_or_else(|| MovpressError::Probe {
            path: path.display().to_string(),
            message: format!("unparseable duration output: {:?}", stdout.trim()),
        })
    }
}

impl Default for DurationProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the probe tool's plain-seconds stdout. Pure float parse, no unit
/// conversion; negative and non-finite values are rejected.
pub fn parse_probe_duration(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}
