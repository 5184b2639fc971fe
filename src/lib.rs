//! hexflat library - flatten transparent hex colors in JSON documents.
//!
//! Theme files often carry `#RRGGBBAA` colors whose alpha channel some
//! consumers cannot render. This crate composites each such color over an
//! opaque background and rewrites it as the equivalent `#RRGGBB`, leaving the
//! rest of the document (shape, key order, opaque colors) untouched.
//!
//! # Modules
//!
//! - `color`: hex parsing, formatting and alpha compositing
//! - `scan`: tokenizer that finds color-shaped substrings in free text
//! - `rewrite`: structure-preserving document rewrite
//! - `document`: JSON loading and saving
//! - `config`: settings files (YAML/TOML)
//! - `error`: error types with user-recoverable hints
//! - `output`: output mode abstraction (robot/human)
#![forbid(unsafe_code)]

pub mod cli;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod output;
pub mod rewrite;
pub mod scan;
pub mod theme;

pub use color::{DEFAULT_BACKGROUND, Rgb, Rgba};
pub use error::{FlatError, Result};
pub use rewrite::{Replacement, Rewriter};
pub use scan::BoundaryPolicy;
