//! Hex color detection inside free text.
//!
//! Theme files embed colors inside arbitrary string values, so detection works
//! on text rather than on known fields. [`scan`] splits a string into literal
//! spans and color-shaped matches that concatenate back to the original.

mod tokenizer;

pub use tokenizer::{BoundaryPolicy, ColorMatch, Segment, scan};
