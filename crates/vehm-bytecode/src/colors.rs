//! ANSI color codes for listings, traces and machine state.
//!
//! Each field is an escape sequence, or empty when output is plain.
//!
//! - Blue: labels and section names
//! - Green: literals (immediates, memory operands, static strings)
//! - Dim: addresses, comments, trace metadata
//! - Red: faults and illegal writes

/// Escape sequences written around colored spans.
///
/// Renderers always write `{color}text{reset}`, so [`Colors::OFF`] yields
/// plain text without a separate code path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Labels, `_START` and jump targets.
    pub blue: &'static str,
    /// Immediates, memory addresses and static items.
    pub green: &'static str,
    /// Address comments and trace annotations.
    pub dim: &'static str,
    /// Runtime faults.
    pub red: &'static str,
    /// Closes any of the above.
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        red: "\x1b[31m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        dim: "",
        red: "",
        reset: "",
    };

    /// Palette for a resolved `--color` setting.
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }
}
