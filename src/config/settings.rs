//! Settings file loading.
//!
//! Settings are read from YAML or TOML, chosen by file extension. Every
//! field is optional; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use crate::color::{DEFAULT_BACKGROUND, Rgb};
use crate::document::DEFAULT_INDENT;
use crate::error::{FlatError, Result, ResultExt};
use crate::rewrite::Rewriter;
use crate::scan::BoundaryPolicy;

/// Largest accepted indent width.
pub const MAX_INDENT: usize = 16;

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
}

impl ConfigFormat {
    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting config format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }

    fn detect(path: &Path) -> Result<Self> {
        Self::from_extension(path).ok_or_else(|| {
            FlatError::ConfigParse(format!(
                "Unknown config format for '{}': expected .yaml, .yml, or .toml",
                path.display()
            ))
        })
    }
}

/// Flattening settings.
///
/// # Example TOML
///
/// ```toml
/// background = "#0E1017"
/// indent = 4
/// boundary = "strict"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Opaque color that transparent colors are composited over.
    pub background: Rgb,
    /// Spaces per indentation level in written documents.
    pub indent: usize,
    /// How hex digit runs are matched inside strings.
    pub boundary: BoundaryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            indent: DEFAULT_INDENT,
            boundary: BoundaryPolicy::default(),
        }
    }
}

impl Settings {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns [`FlatError::ConfigInvalid`] if the indent is too wide.
    pub fn validate(&self) -> Result<()> {
        if self.indent > MAX_INDENT {
            return Err(FlatError::ConfigInvalid(format!(
                "indent {} is out of range (0-{MAX_INDENT})",
                self.indent
            )));
        }
        debug!(indent = self.indent, "Settings validated");
        Ok(())
    }

    /// A rewriter using these settings.
    pub const fn rewriter(&self) -> Rewriter {
        Rewriter::new(self.background, self.boundary)
    }
}

/// Load settings from a file.
///
/// # Errors
///
/// Returns an error if:
/// - The format cannot be detected from the extension
/// - The file cannot be read ([`FlatError::ConfigNotFound`] if missing)
/// - The content cannot be parsed or fails validation
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    info!("Loading configuration file");

    let format = ConfigFormat::detect(path)?;
    debug!(format = ?format, "Detected config format");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FlatError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            FlatError::Io(e)
        }
    })?;
    debug!(bytes = content.len(), "Read config file");

    load_settings_from_str(&content, format)
}

/// Load settings from a string with a specified format.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
#[instrument(skip(content), fields(format = ?format, content_len = content.len()))]
pub fn load_settings_from_str(content: &str, format: ConfigFormat) -> Result<Settings> {
    let settings: Settings = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| FlatError::ConfigParse(format!("YAML: {e}")))?,
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| FlatError::ConfigParse(format!("TOML: {e}")))?
        }
    };

    settings.validate()?;

    info!(
        background = %settings.background,
        indent = settings.indent,
        boundary = ?settings.boundary,
        "Configuration loaded and validated"
    );
    Ok(settings)
}

/// Render settings in the given format.
///
/// # Errors
///
/// Returns [`FlatError::ConfigParse`] if serialization fails.
pub fn render_settings(settings: &Settings, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Yaml => {
            serde_yaml::to_string(settings).map_err(|e| FlatError::ConfigParse(format!("YAML: {e}")))
        }
        ConfigFormat::Toml => toml::to_string_pretty(settings)
            .map_err(|e| FlatError::ConfigParse(format!("TOML: {e}"))),
    }
}

/// Save settings to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the format cannot be detected, serialization fails,
/// or the file cannot be written.
#[instrument(skip(settings), fields(path = %path.as_ref().display()))]
pub fn save_settings<P: AsRef<Path>>(settings: &Settings, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = ConfigFormat::detect(path)?;
    let content = render_settings(settings, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory {}", parent.display())
        })?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    info!("Configuration saved");
    Ok(())
}
