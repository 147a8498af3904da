//! Console UI primitives.
//!
//! - **Context**: what the terminal allows (color, prompts, notices)
//! - **Theme**: badges and the ANSI palette

pub mod theme;

use std::io::IsTerminal;

pub use theme::Badge;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiContext {
    /// Color diagnostics on stderr
    pub color: bool,
    /// Show prompts (stdin is a TTY and not quiet)
    pub interactive: bool,
    /// Suppress banner and notices
    pub quiet: bool,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    ///
    /// Color is disabled by `--no-color`, `NO_COLOR`, `TERM=dumb`, or a
    /// non-TTY stderr.
    pub fn from_env(no_color_flag: bool, quiet: bool) -> Self {
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();
        let color =
            std::io::stderr().is_terminal() && !no_color_flag && !no_color_env && !term_is_dumb;
        let interactive = std::io::stdin().is_terminal() && !quiet;

        Self {
            color,
            interactive,
            quiet,
        }
    }
}
