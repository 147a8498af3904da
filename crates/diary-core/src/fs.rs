//! Filesystem helpers for replacing the diary file in one step.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write `contents` to `destination` through a sibling temp file.
///
/// The parent directory is created when missing. Readers never observe a
/// half-written diary: the temp file is flushed and then renamed over the
/// destination.
pub fn write_atomic(destination: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_sibling(destination);
    discard_on_error(&temp_path, write_temp(&temp_path, contents))?;
    replace_file(&temp_path, destination)
}

/// Remove a partially written temp file when `result` is an error.
fn discard_on_error(temp_path: &Path, result: io::Result<()>) -> io::Result<()> {
    if result.is_err() {
        let _ = fs::remove_file(temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Rename `temp_path` over `destination`.
///
/// `fs::rename` fails on some platforms (notably Windows) when the destination
/// exists, so the destination is removed and the rename retried once. On final
/// failure the temp file is cleaned up.
fn replace_file(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Replacing {} failed (initial: {}, retry: {})",
                    destination.display(),
                    initial_err,
                    retry_err
                ),
            )
        })?;
    }
    Ok(())
}

fn temp_sibling(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "diary".to_string());
    destination.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}
