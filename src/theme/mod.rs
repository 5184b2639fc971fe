//! Terminal palette for human-mode output.

use console::Style;

use crate::color::Rgb;

/// Styles used by [`crate::output::HumanOutput`].
#[derive(Debug, Clone)]
pub struct Palette {
    pub header: Style,
    pub label: Style,
    pub value: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub muted: Style,
    pub pointer: Style,
    pub before: Style,
    pub after: Style,
}

impl Palette {
    /// Colored palette. `console` drops the colors itself when they are
    /// disabled (NO_COLOR, non-TTY, `--no-color`).
    pub fn colored() -> Self {
        Self {
            header: Style::new().bold().cyan(),
            label: Style::new().dim(),
            value: Style::new().bold(),
            success: Style::new().bold().green(),
            warning: Style::new().bold().yellow(),
            error: Style::new().bold().red(),
            muted: Style::new().dim(),
            pointer: Style::new().cyan(),
            before: Style::new().yellow(),
            after: Style::new().green(),
        }
    }

    /// Unstyled palette.
    pub fn plain() -> Self {
        let s = Style::new;
        Self {
            header: s(),
            label: s(),
            value: s(),
            success: s(),
            warning: s(),
            error: s(),
            muted: s(),
            pointer: s(),
            before: s(),
            after: s(),
        }
    }

    /// A swatch of `color` as a true-color block, when colors are enabled.
    pub fn swatch(&self, color: Rgb, enabled: bool) -> String {
        if enabled {
            // console 0.15 styles only go up to 256 colors; a 24-bit
            // background needs the raw SGR sequence.
            format!("\x1b[48;2;{};{};{}m  \x1b[0m", color.r, color.g, color.b)
        } else {
            String::new()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}
