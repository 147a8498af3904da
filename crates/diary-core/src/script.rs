//! Command scripts typed at the top-level prompt.
//!
//! A script is a whitespace-separated line of filters followed by at most one
//! report, for example `week by-tag gym series`. Filters run left to right over
//! a copy of the diary; the live diary is never touched.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::filter::Filter;
use crate::model::{Diary, Record};
use crate::report::{ReportKind, ReportOutput};

/// Why a script line was rejected. Nothing runs when parsing fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown command: {0}")]
    UnknownToken(String),

    #[error("by-tag needs a tag")]
    MissingTag,

    #[error("unexpected \"{token}\" after report \"{report}\"")]
    TrailingToken { report: String, token: String },
}

/// A parsed command line: filters in application order, then a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub filters: Vec<Filter>,
    pub report: Option<ReportKind>,
}

/// What running a script produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Records left after the filter chain
    pub matched: usize,
    /// Report output, when the script ended with a report
    pub report: Option<ReportOutput>,
}

impl Script {
    /// Parse a whole line.
    pub fn parse(line: &str) -> Result<Self, ScriptError> {
        Self::parse_tokens(line.split_whitespace())
    }

    /// Parse a token stream left to right.
    pub fn parse_tokens<'a, I>(tokens: I) -> Result<Self, ScriptError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut script = Script::default();
        let mut tokens = tokens.into_iter();

        while let Some(token) = tokens.next() {
            if let Some(report) = script.report {
                return Err(ScriptError::TrailingToken {
                    report: report_token(report).to_string(),
                    token: token.to_string(),
                });
            }
            match token {
                "week" => script.filters.push(Filter::Week),
                "month" => script.filters.push(Filter::Month),
                "by-tag" => {
                    let tag = tokens.next().ok_or(ScriptError::MissingTag)?;
                    script.filters.push(Filter::Tag(tag.to_string()));
                }
                "tags" => script.report = Some(ReportKind::Tags),
                "latest" => script.report = Some(ReportKind::Latest),
                "series" => script.report = Some(ReportKind::Series),
                other => return Err(ScriptError::UnknownToken(other.to_string())),
            }
        }

        Ok(script)
    }

    /// Run the script over a snapshot of `diary`.
    pub fn evaluate(&self, diary: &Diary, today: NaiveDate) -> Evaluation {
        let snapshot: Vec<Record> = diary.clone().into_records();
        let filtered = self
            .filters
            .iter()
            .fold(snapshot, |records, filter| filter.apply(&records, today));

        debug!(
            filters = self.filters.len(),
            matched = filtered.len(),
            "script evaluated"
        );

        Evaluation {
            matched: filtered.len(),
            report: self.report.map(|kind| kind.run(&filtered)),
        }
    }
}

fn report_token(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Tags => "tags",
        ReportKind::Latest => "latest",
        ReportKind::Series => "series",
    }
}
