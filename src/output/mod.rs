//! Output mode abstraction for robot and human output.

use std::path::Path;

use serde::Serialize;

use crate::cli::Cli;
use crate::color::Rgb;
use crate::config::{LoadedSettings, Settings};
use crate::error::FlatError;
use crate::rewrite::Replacement;
use crate::scan::BoundaryPolicy;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

// === Report Types ===

/// Result of a `transform` run.
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    pub input: String,
    /// Destination, or `None` for a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub dry_run: bool,
    pub background: Rgb,
    pub boundary: BoundaryPolicy,
    pub count: usize,
    pub replacements: Vec<Replacement>,
}

/// Result of a `scan` run.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub input: String,
    pub background: Rgb,
    pub boundary: BoundaryPolicy,
    pub count: usize,
    pub replacements: Vec<Replacement>,
}

/// Result of a `check` run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub input: String,
    pub ok: bool,
    pub transparent_count: usize,
    /// JSON pointers of strings that still hold transparent colors.
    pub locations: Vec<String>,
}

/// Result of compositing a single color.
#[derive(Debug, Clone, Serialize)]
pub struct OverlayReport {
    pub input: String,
    pub background: Rgb,
    pub alpha: u8,
    pub result: String,
    pub rgb: Rgb,
}

/// Effective settings and where they came from.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub settings: Settings,
}

impl From<&LoadedSettings> for SettingsReport {
    fn from(loaded: &LoadedSettings) -> Self {
        Self {
            source: loaded.source.as_ref().map(|p| p.display().to_string()),
            settings: loaded.settings.clone(),
        }
    }
}

/// Build and version metadata.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_sha: &'static str,
    pub git_dirty: bool,
    pub build_timestamp: &'static str,
    pub rustc_version: &'static str,
    pub target: &'static str,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON output for AI agents and scripting.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human { color: bool, quiet: bool },
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human {
                color: !cli.no_color && console::colors_enabled(),
                quiet: cli.quiet,
            }
        }
    }

    /// Returns true if output should be JSON.
    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human { color, quiet } => Box::new(HumanOutput::new(color, quiet)),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn error(&self, error: &FlatError);
    fn warning(&self, message: &str);

    // Document operations
    fn transformed(&self, report: &TransformReport);
    fn scanned(&self, report: &ScanReport);
    fn checked(&self, report: &CheckReport);
    fn overlaid(&self, report: &OverlayReport);

    // Configuration
    fn settings(&self, report: &SettingsReport);
    fn settings_path(&self, path: Option<&Path>);
    fn config_written(&self, path: &Path, settings: &Settings);

    // Metadata
    fn version_info(&self, info: &VersionInfo);
}
