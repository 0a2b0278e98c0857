//! ANSI colouring for reports.

use crate::stream::Token;

/// ANSI color codes for report output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const HEX: &str = "\x1b[1;34m"; // Bold blue
    pub const HEADER: &str = "\x1b[1m"; // Bold
    pub const WARNING: &str = "\x1b[0;33m"; // Yellow
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const CARET: &str = "\x1b[1;32m"; // Bold green
}

/// Color scheme that can be disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub hex: &'static str,
    pub header: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub caret: &'static str,
    pub reset: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}

impl Palette {
    pub fn new(use_color: bool) -> Self {
        if use_color {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    pub fn ansi() -> Self {
        Self {
            hex: colors::HEX,
            header: colors::HEADER,
            warning: colors::WARNING,
            error: colors::ERROR,
            caret: colors::CARET,
            reset: colors::RESET,
        }
    }

    pub fn plain() -> Self {
        Self {
            hex: "",
            header: "",
            warning: "",
            error: "",
            caret: "",
            reset: "",
        }
    }

    /// A token as a 4-digit lowercase hex word.
    pub fn hex(&self, value: Token) -> String {
        format!("{}{:04x}{}", self.hex, value, self.reset)
    }
}
