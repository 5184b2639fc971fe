//! Loading and saving JSON theme documents.
//!
//! A location of `-` means stdin (when reading) or stdout (when writing).
//! Output is indented JSON with object keys in input order.

use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, instrument};

use crate::error::{FlatError, Result, ResultExt};

/// Indentation used when nothing else is configured.
pub const DEFAULT_INDENT: usize = 4;

/// Where a document is read from or written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// stdin or stdout, spelled `-`.
    Stdio,
    File(PathBuf),
}

impl Location {
    pub const fn is_stdio(&self) -> bool {
        matches!(self, Self::Stdio)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdio
        } else {
            Self::File(path.to_path_buf())
        }
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Self::from(path.as_path())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("-"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads and parses a JSON document.
///
/// # Errors
///
/// [`FlatError::InputNotFound`] if the file does not exist,
/// [`FlatError::Io`] for other read failures and [`FlatError::Parse`] if the
/// content is not well-formed JSON.
#[instrument(skip_all, fields(location = %location))]
pub fn read_document(location: &Location) -> Result<Value> {
    let content = match location {
        Location::Stdio => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| "Failed to read stdin")?;
            buf
        }
        Location::File(path) => std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                FlatError::InputNotFound {
                    path: path.display().to_string(),
                }
            } else {
                FlatError::Io(e)
            }
        })?,
    };
    debug!(bytes = content.len(), "Read document");

    parse_document(&content, &location.to_string())
}

/// Parses a JSON document from a string. `source_name` is used in errors.
///
/// # Errors
///
/// Returns [`FlatError::Parse`] if `content` is not well-formed JSON.
pub fn parse_document(content: &str, source_name: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| FlatError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// Serializes `value` as JSON indented by `indent` spaces, with a trailing
/// newline.
///
/// # Errors
///
/// Returns [`FlatError::Serialize`] if serialization fails.
pub fn to_json_string(value: &Value, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| FlatError::Serialize(e.to_string()))?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| FlatError::Serialize(e.to_string()))
}

/// Serializes and writes a document.
///
/// The whole document is serialized before anything is written.
///
/// # Errors
///
/// Returns [`FlatError::Other`] naming the destination if it cannot be
/// written, or [`FlatError::Io`] if stdout fails.
#[instrument(skip_all, fields(location = %location, indent = indent))]
pub fn write_document(value: &Value, location: &Location, indent: usize) -> Result<()> {
    let content = to_json_string(value, indent)?;
    match location {
        Location::Stdio => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
        Location::File(path) => std::fs::write(path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?,
    }
    info!(bytes = content.len(), "Document written");
    Ok(())
}
