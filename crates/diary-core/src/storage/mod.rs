//! Storage layer for diaries.
//!
//! - [`DiaryStore`]: the load/save contract a session is run against
//! - [`JsonFileStore`]: a diary kept as one JSON file

mod json_file;
mod traits;

pub use json_file::JsonFileStore;
pub use traits::DiaryStore;
