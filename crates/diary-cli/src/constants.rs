//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 4: Diary file could not be decoded
pub mod exit_codes {
    /// General failure, including unwritable diary files.
    pub const FAILURE: i32 = 1;

    /// Diary file could not be decoded.
    pub const INVALID_INPUT: i32 = 4;
}

/// Banner printed above the latest entry at startup.
pub const LATEST_BANNER: &str = "**** Latest entry";

/// Default prompts per parser mode.
pub mod prompts {
    pub const TOP_LEVEL: &str = "> ";
    pub const IN_RECORD: &str = ". ";
    pub const IN_FREE_TEXT: &str = "| ";
}
