//! The line-driven state machine behind the interactive prompt.
//!
//! ```text
//! TopLevel --"new {"--> InRecord --"text: ..."--> InFreeText
//!    ^                   |   ^                        |
//!    +-------"}"---------+   +---"===" / "tags:" / "time:"
//!    ^                                                |
//!    +---------------------------"}"------------------+
//! ```
//!
//! At the top level every other line is a command script (see
//! [`crate::script`]). Inside a record, `time:`, `tags:` and `text:` set fields.
//! Malformed input never ends the session: it produces a [`Diagnostic`] and
//! leaves the state as it was.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{Clock, Diary, Draft, SystemClock};
use crate::script::{Script, ScriptError};
use crate::sink::Sink;

/// Date format accepted by `time:`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Line that ends free text without closing the record.
pub const TEXT_TERMINATOR: &str = "===";

/// Parser state. The draft lives inside the state while a record is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParserState {
    #[default]
    TopLevel,
    InRecord(Draft),
    InFreeText(Draft),
}

/// State name without the draft, for prompts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    TopLevel,
    InRecord,
    InFreeText,
}

impl ParserState {
    pub fn mode(&self) -> Mode {
        match self {
            ParserState::TopLevel => Mode::TopLevel,
            ParserState::InRecord(_) => Mode::InRecord,
            ParserState::InFreeText(_) => Mode::InFreeText,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            ParserState::TopLevel => None,
            ParserState::InRecord(draft) | ParserState::InFreeText(draft) => Some(draft),
        }
    }
}

/// What the caller should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop reading input; save first when `save` is set.
    Exit { save: bool },
}

/// Recoverable input problems reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("date not understood: {0} (use YYYY-MM-DD or today)")]
    DateNotUnderstood(String),

    #[error("closing brace closes nothing")]
    StrayClosingBrace,

    #[error("can't open a new record while in a record")]
    NestedRecord,

    #[error("invalid tag: {0}")]
    InvalidTag(String),

    #[error("can't exit while in a record; close it with }} first")]
    ExitInRecord,

    #[error("unfinished record discarded")]
    DraftDiscarded,

    #[error("{0}")]
    Script(#[from] ScriptError),
}

/// How loudly a diagnostic should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::DraftDiscarded | Diagnostic::StrayClosingBrace => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// One interactive session over a diary.
pub struct Session<C: Clock = SystemClock> {
    state: ParserState,
    diary: Diary,
    dirty: bool,
    clock: C,
}

impl Session<SystemClock> {
    pub fn new(diary: Diary) -> Self {
        Self::with_clock(diary, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(diary: Diary, clock: C) -> Self {
        Self {
            state: ParserState::TopLevel,
            diary,
            dirty: false,
            clock,
        }
    }

    pub fn diary(&self) -> &Diary {
        &self.diary
    }

    pub fn into_diary(self) -> Diary {
        self.diary
    }

    /// True once a record has been stored since the diary was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Process one line of input.
    pub fn feed(&mut self, line: &str, sink: &mut dyn Sink) -> Flow {
        let state = std::mem::take(&mut self.state);
        let before = state.mode();
        let (next, flow) = match state {
            ParserState::TopLevel => self.top_level(line, sink),
            ParserState::InRecord(draft) => self.in_record(draft, line, sink),
            ParserState::InFreeText(draft) => self.in_free_text(draft, line, sink),
        };
        if next.mode() != before {
            debug!(from = ?before, to = ?next.mode(), "parser transition");
        }
        self.state = next;
        flow
    }

    /// End of input. Behaves like `exit`, except an open record is dropped.
    pub fn finish(&mut self, sink: &mut dyn Sink) -> Flow {
        if let Some(draft) = std::mem::take(&mut self.state).draft() {
            if !draft.is_empty() {
                warn!(tags = ?draft.tags, "input ended inside a record; draft discarded");
                sink.diagnostic(&Diagnostic::DraftDiscarded);
            }
        }
        Flow::Exit { save: self.dirty }
    }

    fn top_level(&mut self, line: &str, sink: &mut dyn Sink) -> (ParserState, Flow) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (ParserState::TopLevel, Flow::Continue);
        }
        if is_open_record(trimmed) {
            return (ParserState::InRecord(Draft::new()), Flow::Continue);
        }
        if is_exit(trimmed) {
            return (ParserState::TopLevel, Flow::Exit { save: self.dirty });
        }
        if trimmed == "}" {
            sink.diagnostic(&Diagnostic::StrayClosingBrace);
            return (ParserState::TopLevel, Flow::Continue);
        }

        match Script::parse(trimmed) {
            Ok(script) => {
                let evaluation = script.evaluate(&self.diary, self.clock.today());
                if let Some(report) = evaluation.report {
                    sink.report(&report);
                }
            }
            Err(err) => sink.diagnostic(&Diagnostic::Script(err)),
        }
        (ParserState::TopLevel, Flow::Continue)
    }

    fn in_record(
        &mut self,
        mut draft: Draft,
        line: &str,
        sink: &mut dyn Sink,
    ) -> (ParserState, Flow) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (ParserState::InRecord(draft), Flow::Continue);
        }
        if trimmed == "}" {
            return self.seal(draft, sink);
        }
        if is_open_record(trimmed) {
            sink.diagnostic(&Diagnostic::NestedRecord);
            return (ParserState::InRecord(draft), Flow::Continue);
        }
        if is_exit(trimmed) {
            sink.diagnostic(&Diagnostic::ExitInRecord);
            return (ParserState::InRecord(draft), Flow::Continue);
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            sink.diagnostic(&Diagnostic::InvalidTag(trimmed.to_string()));
            return (ParserState::InRecord(draft), Flow::Continue);
        };

        match key.trim() {
            "time" => match parse_event_time(value, &self.clock) {
                Some(date) => draft.event_time = Some(date),
                None => {
                    let value = value.trim().to_string();
                    sink.diagnostic(&Diagnostic::DateNotUnderstood(value));
                }
            },
            "tags" => draft.tags = parse_tags(value),
            "text" => {
                draft.text = value.trim().to_string();
                return (ParserState::InFreeText(draft), Flow::Continue);
            }
            other => sink.diagnostic(&Diagnostic::InvalidTag(other.to_string())),
        }
        (ParserState::InRecord(draft), Flow::Continue)
    }

    fn in_free_text(
        &mut self,
        mut draft: Draft,
        line: &str,
        sink: &mut dyn Sink,
    ) -> (ParserState, Flow) {
        let trimmed = line.trim();
        if trimmed == TEXT_TERMINATOR {
            return (ParserState::InRecord(draft), Flow::Continue);
        }
        if trimmed == "}" {
            return self.seal(draft, sink);
        }
        if is_open_record(trimmed) {
            sink.diagnostic(&Diagnostic::NestedRecord);
            return (ParserState::InFreeText(draft), Flow::Continue);
        }
        if trimmed.starts_with("tags:") || trimmed.starts_with("time:") {
            return self.in_record(draft, line, sink);
        }

        if draft.text.is_empty() {
            draft.text = trimmed.to_string();
        } else {
            draft.text.push('\n');
            draft.text.push_str(line);
        }
        (ParserState::InFreeText(draft), Flow::Continue)
    }

    fn seal(&mut self, draft: Draft, sink: &mut dyn Sink) -> (ParserState, Flow) {
        let record = self.diary.add_entry(draft, self.clock.now());
        info!(
            written_time = %record.written_time,
            tags = record.tags.len(),
            "record stored"
        );
        self.dirty = true;
        sink.notice("record stored");
        (ParserState::TopLevel, Flow::Continue)
    }
}

/// `new {`, tolerating any spacing between `new` and `{`.
fn is_open_record(trimmed: &str) -> bool {
    trimmed
        .strip_prefix("new")
        .is_some_and(|rest| rest.trim_start() == "{")
}

fn is_exit(trimmed: &str) -> bool {
    matches!(trimmed, "exit" | "quit")
}

/// Parse the value of a `time:` line.
pub fn parse_event_time(value: &str, clock: &impl Clock) -> Option<NaiveDate> {
    let value = value.trim();
    if value == "today" {
        return Some(clock.today());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parse the value of a `tags:` line: comma separated, trimmed, empties dropped.
pub fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
