//! Diary stored as a single tab-indented JSON array.
//!
//! Each record is an object with `EventTime` (`YYYY-MM-DD` or `null`),
//! `WrittenTime` (RFC 3339), `Tags` and `Text`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};

use crate::error::{DiaryError, Result};
use crate::fs::write_atomic;
use crate::model::Diary;
use crate::storage::traits::DiaryStore;

/// JSON file backend.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode(diary: &Diary) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        diary.serialize(&mut serializer)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

impl DiaryStore for JsonFileStore {
    fn load(&self) -> Result<Diary> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(DiaryError::NotFound(self.path.display().to_string()));
            }
            Err(err) => {
                return Err(DiaryError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    err
                )));
            }
        };

        let mut diary: Diary = serde_json::from_slice(&bytes).map_err(|e| {
            DiaryError::Parse(format!("{}: {}", self.path.display(), e))
        })?;
        diary.sort_chronologically();
        info!(path = %self.path.display(), records = diary.len(), "diary loaded");
        Ok(diary)
    }

    fn save(&self, diary: &Diary) -> Result<()> {
        let contents = Self::encode(diary)?;
        debug!(bytes = contents.len(), "diary encoded");
        write_atomic(&self.path, &contents).map_err(|e| {
            DiaryError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        info!(path = %self.path.display(), records = diary.len(), "diary saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
