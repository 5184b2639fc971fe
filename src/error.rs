//! Error types for hexflat operations.

use thiserror::Error;

/// Primary error type for hexflat operations.
#[derive(Error, Debug)]
pub enum FlatError {
    // Color errors
    #[error("Invalid hex color '{token}': {reason}")]
    InvalidFormat { token: String, reason: String },

    // Document errors
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Failed to parse {source_name} as JSON: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("Failed to serialize document: {0}")]
    Serialize(String),

    #[error("Found {count} transparent color(s)")]
    TransparentColorsFound { count: usize },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Configuration file already exists: {path}")]
    ConfigExists { path: String },

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl FlatError {
    /// Builds an [`FlatError::InvalidFormat`] for `token`.
    pub fn invalid_format(token: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. }
                | Self::InputNotFound { .. }
                | Self::Parse { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigInvalid(_)
                | Self::ConfigExists { .. }
                | Self::TransparentColorsFound { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidFormat { .. } => {
                Some("Use 6 or 8 hex digits, optionally prefixed with '#' (e.g. 0E1017)")
            }
            Self::InputNotFound { .. } => Some("Check the input path, or pass '-' to read stdin"),
            Self::ConfigNotFound { .. } => Some("Run: hexflat init"),
            Self::ConfigExists { .. } => Some("Use --force to overwrite it"),
            Self::TransparentColorsFound { .. } => Some("Run: hexflat transform --in-place <FILE>"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using FlatError.
pub type Result<T> = std::result::Result<T, FlatError>;

/// Extension trait for adding context to foreign errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| FlatError::Other(format!("{}: {e}", f().into())))
    }
}
