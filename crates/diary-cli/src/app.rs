use std::path::PathBuf;

use tracing::info;

use diary_core::{Diary, DiaryError, DiaryStore, Flow, JsonFileStore, Session};

use crate::cli::Cli;
use crate::config::{default_config_path, default_diary_path, read_config, DiaryConfig};
use crate::console::{run_session, ConsoleSink, Prompts};
use crate::constants::exit_codes;
use crate::ui::UiContext;

/// Config file location: `--config` / `DIARY_CONFIG`, else the XDG default.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.config.as_ref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    default_config_path()
}

/// Read the config file. A missing default config means defaults; a missing
/// explicit config is an error.
pub fn load_config(cli: &Cli) -> anyhow::Result<DiaryConfig> {
    let path = resolve_config_path(cli)?;
    if !path.exists() {
        if cli.config.is_some() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }
        return Ok(DiaryConfig::default());
    }
    read_config(&path)
}

/// Diary location: positional / `DIARY_PATH`, then config, then the XDG default.
pub fn resolve_diary_path(cli: &Cli, config: &DiaryConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.path.as_ref() {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.diary.path.as_ref() {
        return Ok(PathBuf::from(path));
    }
    default_diary_path()
}

/// Load the diary, starting empty when nothing has been saved yet.
pub fn load_or_empty(store: &impl DiaryStore) -> diary_core::Result<Diary> {
    match store.load() {
        Ok(diary) => Ok(diary),
        Err(err) if err.is_not_found() => {
            info!(path = %store.location(), "no diary yet; starting empty");
            Ok(Diary::new())
        }
        Err(err) => Err(err),
    }
}

/// Run one interactive session against the resolved diary file.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let path = resolve_diary_path(cli, &config)?;
    let store = JsonFileStore::new(&path);
    let diary = load_or_empty(&store)?;

    let ctx = UiContext::from_env(cli.no_color, cli.quiet);
    let mut sink = ConsoleSink::stdio(ctx);

    if config.ui.show_latest && !ctx.quiet {
        // An empty diary has no latest entry; the banner is simply skipped.
        if let Ok(record) = diary.latest_written() {
            sink.latest_entry(record);
        }
    }

    let prompts = Prompts::new(config.ui.prompt.as_deref());
    let mut session = Session::new(diary);
    let end = run_session(&mut session, std::io::stdin().lock(), &mut sink, &prompts);

    if let Flow::Exit { save: true } = end.flow {
        store.save(session.diary())?;
        sink.message(&format!(
            "Wrote {} records to {}",
            session.diary().len(),
            store.location()
        ));
    }
    match end.read_error {
        Some(err) => Err(anyhow::anyhow!("Failed to read input: {}", err)),
        None => Ok(()),
    }
}

/// Map an error to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<DiaryError>() {
        Some(DiaryError::Parse(_)) => exit_codes::INVALID_INPUT,
        _ => exit_codes::FAILURE,
    }
}
