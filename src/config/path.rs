//! Config file locations and "~" expansion.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::settings::ConfigFormat;
use crate::error::{FlatError, Result};

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "hexflat.toml";

/// Expand a leading `~` to the home directory. Other paths are returned as-is.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    if path_str == "~" || path_str.starts_with("~/") {
        let home = home_dir()?;
        let rest = path_str.strip_prefix("~/").unwrap_or("");
        let resolved = if rest.is_empty() {
            home
        } else {
            home.join(rest)
        };
        debug!(
            original = %path.display(),
            resolved = %resolved.display(),
            "Expanded home directory path"
        );
        return Ok(resolved);
    }

    trace!(path = %path.display(), "Using path as-is");
    Ok(path.to_path_buf())
}

/// Resolve the user's home directory (cross-platform).
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        FlatError::ConfigInvalid("Could not determine home directory".to_string())
    })
}

/// Per-user config file, e.g. `~/.config/hexflat/config.toml` on Linux.
pub fn user_config_path() -> Option<PathBuf> {
    let file = format!("config.{}", ConfigFormat::Toml.extension());
    dirs::config_dir().map(|dir| dir.join("hexflat").join(file))
}

/// Candidate config files in lookup order: the working directory first,
/// then the per-user config directory.
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    candidates.extend(user_config_path());
    candidates
}
