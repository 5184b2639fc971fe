//! Hex color parsing and alpha compositing.
//!
//! Colors are exchanged as hex tokens: 6 digits (`RRGGBB`, implicitly opaque)
//! or 8 digits (`RRGGBBAA`), each optionally prefixed with `#`. Compositing
//! always yields an opaque color, emitted as 6 uppercase digits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{FlatError, Result};

/// Background used when nothing else is configured (`#0E1017`).
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(0x0E, 0x10, 0x17);

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&color_to_hex(*self))
    }
}

/// Parses a background-style token. An alpha channel, if present, is dropped.
impl FromStr for Rgb {
    type Err = FlatError;

    fn from_str(s: &str) -> Result<Self> {
        let color = hex_to_color(s.trim())?;
        if !color.is_opaque() {
            warn!(token = s, alpha = color.a, "Ignoring alpha channel of background color");
        }
        Ok(color.rgb())
    }
}

impl TryFrom<String> for Rgb {
    type Error = FlatError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        format!("#{value}")
    }
}

/// An 8-bit RGB color with an alpha channel (0 = transparent, 255 = opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Drops the alpha channel.
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }
}

/// Parses a 6- or 8-digit token, keeping the alpha channel.
impl FromStr for Rgba {
    type Err = FlatError;

    fn from_str(s: &str) -> Result<Self> {
        hex_to_color(s.trim())
    }
}

/// Strips a single optional leading `#`.
pub fn strip_hash(token: &str) -> &str {
    token.strip_prefix('#').unwrap_or(token)
}

/// Decodes a 6- or 8-digit hex token.
///
/// # Errors
///
/// Returns [`FlatError::InvalidFormat`] if the token (after stripping `#`)
/// is not exactly 6 or 8 hex digits.
pub fn hex_to_color(token: &str) -> Result<Rgba> {
    let digits = strip_hash(token);
    if digits.len() != 6 && digits.len() != 8 {
        return Err(FlatError::invalid_format(
            token,
            format!("expected 6 or 8 hex digits, got {}", digits.len()),
        ));
    }

    let bytes = hex::decode(digits).map_err(|e| FlatError::invalid_format(token, e.to_string()))?;
    let alpha = bytes.get(3).copied().unwrap_or(u8::MAX);
    Ok(Rgba::new(bytes[0], bytes[1], bytes[2], alpha))
}

/// Returns true if the token carries an alpha channel below 255.
///
/// 6-digit tokens are always opaque.
///
/// # Errors
///
/// Returns [`FlatError::InvalidFormat`] for malformed tokens.
pub fn is_transparent(token: &str) -> Result<bool> {
    Ok(!hex_to_color(token)?.is_opaque())
}

/// Encodes a color as 6 uppercase hex digits, without `#`.
pub fn color_to_hex(color: Rgb) -> String {
    hex::encode_upper([color.r, color.g, color.b])
}

/// Composites `foreground` over an opaque `background`.
pub fn composite(foreground: Rgba, background: Rgb) -> Rgb {
    let alpha = f64::from(foreground.a) / 255.0;
    Rgb::new(
        blend_channel(foreground.r, background.r, alpha),
        blend_channel(foreground.g, background.g, alpha),
        blend_channel(foreground.b, background.b, alpha),
    )
}

/// Composites the token over `background` and returns the opaque result as
/// 6 uppercase hex digits.
///
/// # Errors
///
/// Returns [`FlatError::InvalidFormat`] for malformed tokens.
pub fn overlay(foreground: &str, background: Rgb) -> Result<String> {
    let fg = hex_to_color(foreground)?;
    let out = composite(fg, background);
    trace!(foreground, %background, result = %out, "Overlaid color");
    Ok(color_to_hex(out))
}

/// Like [`overlay`], but keeps the token's `#` prefix when it has one.
///
/// # Errors
///
/// Returns [`FlatError::InvalidFormat`] for malformed tokens.
pub fn flatten_token(token: &str, background: Rgb) -> Result<String> {
    let hex = overlay(token, background)?;
    Ok(if token.starts_with('#') {
        format!("#{hex}")
    } else {
        hex
    })
}

// Not mul_add: fused rounding moves results that sit on a .5 boundary.
#[allow(clippy::suboptimal_flops)]
fn blend_channel(fg: u8, bg: u8, alpha: f64) -> u8 {
    round_channel(f64::from(fg) * alpha + f64::from(bg) * (1.0 - alpha))
}

/// Rounds half to even, then clamps to the channel range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}
