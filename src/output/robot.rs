//! Robot mode JSON output implementation.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::config::Settings;
use crate::error::FlatError;

use super::{
    CheckReport, OverlayReport, Output, RobotFormat, ScanReport, SettingsReport, TransformReport,
    VersionInfo,
};

/// JSON output implementation for AI agents and scripting.
///
/// Results go to stdout, errors to stderr.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    /// Serialize according to the configured format.
    fn render<T: Serialize + ?Sized>(&self, data: &T) -> String {
        let rendered = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        // Report types are plain structs; serialization cannot fail.
        rendered.unwrap_or_else(|e| format!(r#"{{"error":true,"message":"serialization failed: {e}"}}"#))
    }

    /// Output any serializable data as JSON to stdout.
    #[instrument(skip(self, data), fields(format = ?self.format))]
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        let json = self.render(data);
        trace!(json_len = json.len(), "JSON serialized");
        println!("{json}");
    }
}

impl Output for RobotOutput {
    #[instrument(skip(self))]
    fn error(&self, error: &FlatError) {
        debug!(error = %error, "Robot: error");
        let json = self.render(&serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        }));
        eprintln!("{json}");
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        debug!(message, "Robot: warning");
        let json = self.render(&serde_json::json!({
            "warning": true,
            "message": message,
        }));
        eprintln!("{json}");
    }

    #[instrument(skip_all, fields(count = report.count))]
    fn transformed(&self, report: &TransformReport) {
        self.output_json(report);
    }

    #[instrument(skip_all, fields(count = report.count))]
    fn scanned(&self, report: &ScanReport) {
        self.output_json(report);
    }

    #[instrument(skip_all, fields(ok = report.ok))]
    fn checked(&self, report: &CheckReport) {
        self.output_json(report);
    }

    #[instrument(skip_all)]
    fn overlaid(&self, report: &OverlayReport) {
        self.output_json(report);
    }

    #[instrument(skip_all)]
    fn settings(&self, report: &SettingsReport) {
        self.output_json(report);
    }

    #[instrument(skip(self))]
    fn settings_path(&self, path: Option<&Path>) {
        self.output_json(&serde_json::json!({
            "path": path.map(|p| p.display().to_string()),
        }));
    }

    #[instrument(skip(self, settings))]
    fn config_written(&self, path: &Path, settings: &Settings) {
        self.output_json(&serde_json::json!({
            "ok": true,
            "path": path.display().to_string(),
            "settings": settings,
        }));
    }

    #[instrument(skip_all)]
    fn version_info(&self, info: &VersionInfo) {
        self.output_json(info);
    }
}
