//! Summaries computed over a set of records.
//!
//! Every function here takes a slice and returns owned data; none of them
//! touch the diary. An empty input yields an empty report.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use crate::model::{format_event_time, Record};

/// Maximum characters of text shown per time series line.
pub const SUMMARY_WIDTH: usize = 60;

/// The reports a command script can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Tags,
    Latest,
    Series,
}

impl ReportKind {
    /// Run this report over `records`.
    pub fn run(self, records: &[Record]) -> ReportOutput {
        match self {
            ReportKind::Tags => ReportOutput::Tags(tags_report(records)),
            ReportKind::Latest => ReportOutput::Latest(latest_by_tag(records)),
            ReportKind::Series => ReportOutput::Series(time_series(records)),
        }
    }
}

/// Most recent event date for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLatest {
    pub tag: String,
    pub latest: Option<NaiveDate>,
}

/// One point of a time series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub event_time: Option<NaiveDate>,
    pub summary: String,
}

/// Result of a report, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutput {
    Tags(Vec<String>),
    Latest(Vec<TagLatest>),
    Series(Vec<SeriesPoint>),
}

impl ReportOutput {
    pub fn is_empty(&self) -> bool {
        match self {
            ReportOutput::Tags(tags) => tags.is_empty(),
            ReportOutput::Latest(latest) => latest.is_empty(),
            ReportOutput::Series(points) => points.is_empty(),
        }
    }

    /// Display lines, one per tag or point.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ReportOutput::Tags(tags) => tags.clone(),
            ReportOutput::Latest(latest) => latest
                .iter()
                .map(|entry| format!("{}: {}", entry.tag, format_event_time(entry.latest)))
                .collect(),
            ReportOutput::Series(points) => points
                .iter()
                .map(|point| {
                    format!("{}  {}", format_event_time(point.event_time), point.summary)
                })
                .collect(),
        }
    }
}

impl fmt::Display for ReportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Distinct tags in first-seen order.
pub fn tags_report(records: &[Record]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for tag in records.iter().flat_map(|r| r.tags.iter()) {
        if !seen.contains(tag) {
            seen.push(tag.clone());
        }
    }
    seen
}

/// For each tag, the latest `event_time` among the records carrying it.
///
/// Tags come out in first-seen order, matching [`tags_report`].
pub fn latest_by_tag(records: &[Record]) -> Vec<TagLatest> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<TagLatest> = Vec::new();

    for record in records {
        for tag in &record.tags {
            match index.get(tag.as_str()) {
                Some(&slot) => {
                    let entry = &mut out[slot];
                    entry.latest = entry.latest.max(record.event_time);
                }
                None => {
                    index.insert(tag.as_str(), out.len());
                    out.push(TagLatest {
                        tag: tag.clone(),
                        latest: record.event_time,
                    });
                }
            }
        }
    }
    out
}

/// Records projected onto their event date, stably sorted by it.
///
/// Unset dates sort first.
pub fn time_series(records: &[Record]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = records
        .iter()
        .map(|r| SeriesPoint {
            event_time: r.event_time,
            summary: summarize(&r.text),
        })
        .collect();
    points.sort_by_key(|p| p.event_time);
    points
}

/// First line of `text`, truncated with an ellipsis.
pub fn summarize(text: &str) -> String {
    let first = text.lines().next().unwrap_or("").trim();
    truncate(first, SUMMARY_WIDTH)
}

fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}
