//! Filters narrowing a set of records.
//!
//! Filters are stable: retained records keep their relative order. Records
//! whose event date is unset never fall inside a week or a month.

use chrono::{Datelike, NaiveDate};

use crate::model::Record;

/// One step of a filter chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Same ISO week (Monday to Sunday) as today
    Week,
    /// Same calendar month as today
    Month,
    /// Exact, case-sensitive tag match
    Tag(String),
}

impl Filter {
    /// Apply this filter. `today` anchors the week and month filters.
    pub fn apply(&self, records: &[Record], today: NaiveDate) -> Vec<Record> {
        match self {
            Filter::Week => by_week(records, today),
            Filter::Month => by_month(records, today),
            Filter::Tag(tag) => by_tag(records, tag),
        }
    }
}

/// Records whose event date falls in the ISO week containing `today`.
pub fn by_week(records: &[Record], today: NaiveDate) -> Vec<Record> {
    let week = today.iso_week();
    retain(records, |r| {
        r.event_time.is_some_and(|d| d.iso_week() == week)
    })
}

/// Records whose event date falls in the calendar month containing `today`.
pub fn by_month(records: &[Record], today: NaiveDate) -> Vec<Record> {
    retain(records, |r| {
        r.event_time
            .is_some_and(|d| d.year() == today.year() && d.month() == today.month())
    })
}

/// Records carrying `tag`.
pub fn by_tag(records: &[Record], tag: &str) -> Vec<Record> {
    retain(records, |r| r.has_tag(tag))
}

fn retain<F>(records: &[Record], keep: F) -> Vec<Record>
where
    F: Fn(&Record) -> bool,
{
    records.iter().filter(|r| keep(r)).cloned().collect()
}
