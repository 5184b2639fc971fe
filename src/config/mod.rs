//! Configuration module.
//!
//! Settings come from, in order of precedence: command-line flags, an
//! explicitly named config file (`--config` / `HEXFLAT_CONFIG`), then the
//! first existing default file (`./hexflat.toml`, then the per-user config
//! directory), then built-in defaults.

mod path;
mod settings;

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::Result;

pub use path::{LOCAL_CONFIG_FILE, default_candidates, expand_home, home_dir, user_config_path};
pub use settings::{
    ConfigFormat, MAX_INDENT, Settings, load_settings, load_settings_from_str, render_settings,
    save_settings,
};

/// Settings together with the file they were read from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: Option<PathBuf>,
}

/// Resolve settings using the default candidate files.
///
/// # Errors
///
/// Returns an error if an explicit file is missing, or if the chosen file
/// cannot be parsed.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<LoadedSettings> {
    resolve_settings_from(explicit, &default_candidates())
}

/// Resolve settings from an explicit file or the first existing candidate.
///
/// A missing explicit file is an error; missing candidates are skipped.
///
/// # Errors
///
/// Returns an error if an explicit file is missing, or if the chosen file
/// cannot be parsed.
#[instrument(skip(candidates), fields(explicit = ?explicit))]
pub fn resolve_settings_from(
    explicit: Option<&Path>,
    candidates: &[PathBuf],
) -> Result<LoadedSettings> {
    if let Some(path) = explicit {
        let path = expand_home(path)?;
        let settings = load_settings(&path)?;
        return Ok(LoadedSettings {
            settings,
            source: Some(path),
        });
    }

    for candidate in candidates {
        if candidate.is_file() {
            let settings = load_settings(candidate)?;
            return Ok(LoadedSettings {
                settings,
                source: Some(candidate.clone()),
            });
        }
        debug!(candidate = %candidate.display(), "No config file here");
    }

    debug!("Using default settings");
    Ok(LoadedSettings {
        settings: Settings::default(),
        source: None,
    })
}
