//! Diary CLI - an interactive, line-oriented personal diary
//!
//! Loads the diary, hands stdin to a parsing session line by line, and saves
//! the diary again when the session stored new records.

mod app;
mod cli;
mod config;
mod console;
mod constants;
mod logging;
mod ui;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init();

    if let Err(err) = app::run(&cli) {
        tracing::error!(error = %err, "session failed");
        eprintln!("Error: {:#}", err);
        std::process::exit(app::exit_code_for(&err));
    }
}
