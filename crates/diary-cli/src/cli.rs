use clap::Parser;

use diary_core::VERSION;

/// Diary - an interactive, line-oriented personal diary
#[derive(Parser, Debug)]
#[command(name = "diary")]
#[command(author, version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Path to the diary file
    #[arg(value_name = "PATH", env = "DIARY_PATH")]
    pub path: Option<String>,

    /// Config file (defaults to $XDG_CONFIG_HOME/diary/config.toml)
    #[arg(long, value_name = "FILE", env = "DIARY_CONFIG")]
    pub config: Option<String>,

    /// Quiet mode (no banner, prompts or notices)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_path_and_flags() {
        let cli = Cli::try_parse_from(["diary", "notes.json", "-q", "--no-color"]).unwrap();
        assert_eq!(cli.path.as_deref(), Some("notes.json"));
        assert!(cli.quiet);
        assert!(cli.no_color);
    }
}
