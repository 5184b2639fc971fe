//! Splits text into literal spans and hex color matches.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::color::{self, Rgba};

/// How a run of hex digits is turned into color matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// A run matches only when it is exactly 6 or 8 digits long and is not
    /// part of a longer run. `"123456789"` does not match at all.
    #[default]
    Strict,
    /// Leftmost-longest `#?[0-9A-Fa-f]{6,8}`: take up to 8 digits whenever at
    /// least 6 are available. `"123456789"` matches `"12345678"`.
    Greedy,
}

/// A color-shaped substring found by [`scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMatch<'a> {
    /// Full matched text, including any leading `#`.
    pub text: &'a str,
    /// Byte offset of `text` within the scanned string.
    pub offset: usize,
    /// Whether the match starts with `#`.
    pub hash: bool,
    /// The hex digits without `#`.
    pub digits: &'a str,
}

impl ColorMatch<'_> {
    /// Decodes the match. `None` for digit counts other than 6 or 8, which
    /// only [`BoundaryPolicy::Greedy`] produces.
    pub fn color(&self) -> Option<Rgba> {
        color::hex_to_color(self.digits).ok()
    }

    /// True for 8-digit matches with alpha below 255.
    pub fn is_transparent(&self) -> bool {
        self.color().is_some_and(|c| !c.is_opaque())
    }
}

/// One piece of a scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Color(ColorMatch<'a>),
}

impl<'a> Segment<'a> {
    /// The original text of this segment.
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Literal(s) => s,
            Self::Color(m) => m.text,
        }
    }
}

/// Splits `text` into literal and color segments according to `policy`.
///
/// Concatenating [`Segment::as_str`] over the result yields `text` exactly.
/// Empty literals are never emitted.
pub fn scan(text: &str, policy: BoundaryPolicy) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    // Only ASCII bytes are ever split on, so every slice below lands on a
    // char boundary.
    while i < bytes.len() {
        let (hash, digits_start) = if bytes[i] == b'#' {
            (true, i + 1)
        } else {
            (false, i)
        };
        let run_end = hex_run_end(bytes, digits_start);
        let run_len = run_end - digits_start;

        let matched_len = match policy {
            BoundaryPolicy::Strict => {
                // A run reached here is never preceded by a hex digit: runs
                // are always skipped whole.
                matches!(run_len, 6 | 8).then_some(run_len)
            }
            BoundaryPolicy::Greedy => (run_len >= 6).then(|| run_len.min(8)),
        };

        match matched_len {
            Some(len) => {
                let end = digits_start + len;
                if literal_start < i {
                    segments.push(Segment::Literal(&text[literal_start..i]));
                }
                let m = ColorMatch {
                    text: &text[i..end],
                    offset: i,
                    hash,
                    digits: &text[digits_start..end],
                };
                trace!(text = m.text, offset = m.offset, "Matched color token");
                segments.push(Segment::Color(m));
                literal_start = end;
                i = end;
            }
            None if run_len > 0 => i = run_end,
            None => i += 1,
        }
    }

    if literal_start < text.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }
    segments
}

fn hex_run_end(bytes: &[u8], start: usize) -> usize {
    bytes[start.min(bytes.len())..]
        .iter()
        .position(|b| !b.is_ascii_hexdigit())
        .map_or(bytes.len(), |n| start + n)
}
