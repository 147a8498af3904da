//! # Diary Core
//!
//! Core library for Diary - an interactive, line-oriented personal diary.
//!
//! This crate provides the entry model, the parsing state machine behind the
//! prompt and the query engine its command mode runs, independent of the
//! console and of process arguments.
//!
//! ## Architecture
//!
//! - **model**: records, drafts, the diary collection and the clock
//! - **parser**: the `TopLevel` / `InRecord` / `InFreeText` state machine
//! - **script**: command lines parsed into filter chains plus a report
//! - **filter**: week, month and tag filters
//! - **report**: tag list, latest-by-tag and time series summaries
//! - **sink**: where a session sends reports and diagnostics
//! - **storage**: load/save contract and the JSON file backend

pub mod error;
pub mod filter;
pub mod fs;
pub mod model;
pub mod parser;
pub mod report;
pub mod script;
pub mod sink;
pub mod storage;

pub use error::{DiaryError, Result};
pub use model::{Clock, Diary, Draft, FixedClock, Record, SystemClock};
pub use parser::{Diagnostic, Flow, Mode, Session, Severity};
pub use sink::{MemorySink, Sink};
pub use storage::{DiaryStore, JsonFileStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
