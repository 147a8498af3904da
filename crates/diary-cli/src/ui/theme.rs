//! Badges and colors for console diagnostics.

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge text (e.g., "[ERR]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
            Self::Info => "[INFO]",
        }
    }

    /// ANSI color for this badge.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Warn => colors::YELLOW,
            Self::Err => colors::RED,
            Self::Info => colors::CYAN,
        }
    }
}

/// Color definitions using ANSI escape codes.
pub mod colors {
    /// Dim text (for labels, metadata)
    pub const DIM: &str = "\x1b[2m";
    /// Yellow (warning)
    pub const YELLOW: &str = "\x1b[33m";
    /// Red (error)
    pub const RED: &str = "\x1b[31m";
    /// Cyan (info)
    pub const CYAN: &str = "\x1b[36m";
    /// Reset all styles
    pub const RESET: &str = "\x1b[0m";
}

/// Wrap `text` in `color` when color output is enabled.
pub fn styled(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, colors::RESET)
    } else {
        text.to_string()
    }
}
