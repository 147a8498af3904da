//! Diary records and the collection that holds them.
//!
//! A [`Record`] is sealed: it only comes into existence through
//! [`Diary::add_entry`], which stamps its `written_time`. While the user is
//! still typing, the fields live in a [`Draft`].

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DiaryError, Result};

/// A single diary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    /// Day the entry is about (`None` when never supplied)
    #[serde(default)]
    pub event_time: Option<NaiveDate>,

    /// When the entry was committed to the diary
    pub written_time: DateTime<Utc>,

    /// Tags in the order the user typed them
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,

    /// Free text, lines joined with `\n`
    #[serde(default)]
    pub text: String,
}

impl Record {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "time: {}", format_event_time(self.event_time))?;
        writeln!(f, "tags: {}", self.tags.join(", "))?;
        write!(f, "text: {}", self.text)
    }
}

/// Render an event date, or `unset` for the zero date.
pub fn format_event_time(event_time: Option<NaiveDate>) -> String {
    match event_time {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "unset".to_string(),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A record under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub event_time: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub text: String,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event_time(mut self, date: NaiveDate) -> Self {
        self.event_time = Some(date);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// True when no field has been set.
    pub fn is_empty(&self) -> bool {
        self.event_time.is_none() && self.tags.is_empty() && self.text.is_empty()
    }
}

/// Source of "now" for stamping records and resolving relative dates.
pub trait Clock {
    /// Current instant, used for `written_time`.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date, used for `today` and the week/month filters.
    fn today(&self) -> NaiveDate;
}

/// Wall clock. Calendar dates follow the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one instant. Calendar dates are taken in UTC.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Midnight UTC on the given date.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::default()).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// The ordered collection of all records in one diary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diary {
    records: Vec<Record>,
}

impl Diary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Seal a draft into a record and append it.
    ///
    /// `written_time` never goes backwards: if `now` is earlier than the
    /// previous record's stamp, the previous stamp is reused.
    pub fn add_entry(&mut self, draft: Draft, now: DateTime<Utc>) -> &Record {
        let written_time = match self.records.iter().map(|r| r.written_time).max() {
            Some(last) if last > now => last,
            _ => now,
        };
        self.records.push(Record {
            event_time: draft.event_time,
            written_time,
            tags: draft.tags,
            text: draft.text,
        });
        &self.records[self.records.len() - 1]
    }

    /// The most recently written record; on ties the later-inserted one.
    pub fn latest_written(&self) -> Result<&Record> {
        self.records
            .iter()
            .max_by_key(|r| r.written_time)
            .ok_or(DiaryError::EmptyCollection)
    }

    /// The record about the latest day; on ties the later-inserted one.
    pub fn latest_happened(&self) -> Result<&Record> {
        self.records
            .iter()
            .max_by_key(|r| r.event_time)
            .ok_or(DiaryError::EmptyCollection)
    }

    /// Stable sort by `written_time`, recovering commit order.
    pub fn sort_chronologically(&mut self) {
        self.records.sort_by_key(|r| r.written_time);
    }
}

impl<'a> IntoIterator for &'a Diary {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
