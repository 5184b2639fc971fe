//! Human-friendly output implementation.

use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::color::Rgb;
use crate::config::Settings;
use crate::error::FlatError;
use crate::rewrite::Replacement;
use crate::theme::Palette;

use super::{
    CheckReport, OverlayReport, Output, ScanReport, SettingsReport, TransformReport, VersionInfo,
};

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    palette: Palette,
    color: bool,
    quiet: bool,
}

impl HumanOutput {
    #[instrument]
    pub fn new(color: bool, quiet: bool) -> Self {
        debug!("Creating HumanOutput");
        Self {
            palette: if color {
                Palette::colored()
            } else {
                Palette::plain()
            },
            color,
            quiet,
        }
    }

    fn swatch(&self, color: Rgb) -> String {
        self.palette.swatch(color, self.color)
    }

    fn label(&self, name: &str, value: impl std::fmt::Display) {
        println!(
            "  {} {}",
            self.palette.label.apply_to(format!("{name}:")),
            self.palette.value.apply_to(value)
        );
    }

    fn replacement_lines(&self, replacements: &[Replacement]) {
        for r in replacements {
            trace!(pointer = %r.pointer, "Listing replacement");
            println!(
                "  {}  {} -> {}",
                self.palette.pointer.apply_to(display_pointer(&r.pointer)),
                self.palette.before.apply_to(&r.original),
                self.palette.after.apply_to(&r.replacement),
            );
        }
    }
}

/// The root pointer is the empty string; show it as `/`.
fn display_pointer(pointer: &str) -> &str {
    if pointer.is_empty() { "/" } else { pointer }
}

impl Output for HumanOutput {
    #[instrument(skip(self))]
    fn error(&self, error: &FlatError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        eprintln!("{} {}", self.palette.error.apply_to("Error:"), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{} {}", self.palette.warning.apply_to("Hint:"), suggestion);
        }
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        eprintln!("{} {}", self.palette.warning.apply_to("Warning:"), message);
    }

    #[instrument(skip_all, fields(count = report.count, dry_run = report.dry_run))]
    fn transformed(&self, report: &TransformReport) {
        if report.dry_run {
            println!(
                "{} {} transparent color(s) in {}",
                self.palette.header.apply_to("DRY RUN: would flatten"),
                report.count,
                report.input
            );
            self.replacement_lines(&report.replacements);
            return;
        }

        if self.quiet {
            return;
        }
        let target = report.output.as_deref().unwrap_or("-");
        println!(
            "{} Flattened {} color(s): {} -> {}",
            self.palette.success.apply_to("[OK]"),
            report.count,
            report.input,
            target
        );
        println!(
            "  {} {}#{}",
            self.palette.label.apply_to("background:"),
            self.swatch(report.background),
            report.background
        );
    }

    #[instrument(skip_all, fields(count = report.count))]
    fn scanned(&self, report: &ScanReport) {
        if report.replacements.is_empty() {
            println!("No transparent colors in {}", report.input);
            return;
        }
        println!(
            "{} ({} over #{})",
            self.palette.header.apply_to(format!(
                "{} transparent color(s) in {}",
                report.count, report.input
            )),
            self.palette.muted.apply_to(format!("{:?}", report.boundary).to_lowercase()),
            report.background,
        );
        self.replacement_lines(&report.replacements);
    }

    #[instrument(skip_all, fields(ok = report.ok))]
    fn checked(&self, report: &CheckReport) {
        if report.ok {
            if !self.quiet {
                println!(
                    "{} {} has no transparent colors",
                    self.palette.success.apply_to("[OK]"),
                    report.input
                );
            }
            return;
        }
        println!(
            "{} {} transparent color(s) in {}",
            self.palette.error.apply_to("[FAIL]"),
            report.transparent_count,
            report.input
        );
        for location in &report.locations {
            println!("  {}", self.palette.pointer.apply_to(display_pointer(location)));
        }
    }

    #[instrument(skip_all)]
    fn overlaid(&self, report: &OverlayReport) {
        if self.quiet {
            println!("{}", report.result);
            return;
        }
        println!(
            "{} {} over #{} -> {} {}",
            self.palette.header.apply_to("Overlay:"),
            report.input,
            report.background,
            self.swatch(report.rgb),
            self.palette.value.apply_to(&report.result)
        );
    }

    #[instrument(skip_all)]
    fn settings(&self, report: &SettingsReport) {
        println!("{}", self.palette.header.apply_to("Settings"));
        self.label(
            "source",
            report.source.as_deref().unwrap_or("(built-in defaults)"),
        );
        self.label(
            "background",
            format!("{}#{}", self.swatch(report.settings.background), report.settings.background),
        );
        self.label("indent", report.settings.indent);
        self.label(
            "boundary",
            format!("{:?}", report.settings.boundary).to_lowercase(),
        );
    }

    #[instrument(skip(self))]
    fn settings_path(&self, path: Option<&Path>) {
        match path {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", self.palette.muted.apply_to("(no config file; using defaults)")),
        }
    }

    #[instrument(skip(self, settings))]
    fn config_written(&self, path: &Path, settings: &Settings) {
        if self.quiet {
            return;
        }
        println!(
            "{} Wrote {}",
            self.palette.success.apply_to("[OK]"),
            path.display()
        );
        self.label("background", format!("#{}", settings.background));
        self.label("indent", settings.indent);
    }

    #[instrument(skip_all)]
    fn version_info(&self, info: &VersionInfo) {
        println!(
            "{} {}",
            self.palette.header.apply_to("hexflat"),
            info.version
        );
        self.label(
            "git",
            format!(
                "{}{}",
                info.git_sha,
                if info.git_dirty { " (dirty)" } else { "" }
            ),
        );
        self.label("built", info.build_timestamp);
        self.label("rustc", info.rustc_version);
        self.label("target", info.target);
    }
}
