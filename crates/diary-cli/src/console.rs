//! Console side of a session: reading lines and rendering what comes back.

use std::io::{self, BufRead, Write};

use tracing::warn;

use diary_core::report::ReportOutput;
use diary_core::{Clock, Diagnostic, Flow, Mode, Record, Session, Severity, Sink};

use crate::constants::{prompts, LATEST_BANNER};
use crate::ui::theme::{colors, styled};
use crate::ui::{Badge, UiContext};

/// Prompt text for each parser mode.
#[derive(Debug, Clone)]
pub struct Prompts {
    pub top_level: String,
    pub in_record: String,
    pub in_free_text: String,
}

impl Prompts {
    pub fn new(top_level: Option<&str>) -> Self {
        Self {
            top_level: top_level.unwrap_or(prompts::TOP_LEVEL).to_string(),
            in_record: prompts::IN_RECORD.to_string(),
            in_free_text: prompts::IN_FREE_TEXT.to_string(),
        }
    }

    pub fn for_mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::TopLevel => &self.top_level,
            Mode::InRecord => &self.in_record,
            Mode::InFreeText => &self.in_free_text,
        }
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Sink writing reports to `out` and diagnostics to `err`.
pub struct ConsoleSink<O: Write, E: Write> {
    out: O,
    err: E,
    ctx: UiContext,
}

impl ConsoleSink<io::Stdout, io::Stderr> {
    pub fn stdio(ctx: UiContext) -> Self {
        Self::new(io::stdout(), io::stderr(), ctx)
    }
}

impl<O: Write, E: Write> ConsoleSink<O, E> {
    pub fn new(out: O, err: E, ctx: UiContext) -> Self {
        Self { out, err, ctx }
    }

    /// Show a prompt when the session is interactive.
    pub fn prompt(&mut self, text: &str) {
        if !self.ctx.interactive {
            return;
        }
        let _ = write!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    /// Print the startup banner with the latest entry.
    pub fn latest_entry(&mut self, record: &Record) {
        let banner = styled(LATEST_BANNER, colors::DIM, self.ctx.color);
        let _ = writeln!(self.out, "\n{}\n{}\n", banner, record);
    }

    /// Plain line to stdout, unless quiet.
    pub fn message(&mut self, text: &str) {
        if !self.ctx.quiet {
            let _ = writeln!(self.out, "{}", text);
        }
    }

    fn badge_line(&mut self, badge: Badge, message: &str) {
        let badge = styled(badge.text(), badge.color(), self.ctx.color);
        let _ = writeln!(self.err, "{} {}", badge, message);
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Sink for ConsoleSink<O, E> {
    fn report(&mut self, output: &ReportOutput) {
        for line in output.lines() {
            let _ = writeln!(self.out, "{}", line);
        }
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        let badge = match diagnostic.severity() {
            Severity::Warning => Badge::Warn,
            Severity::Error => Badge::Err,
        };
        self.badge_line(badge, &diagnostic.to_string());
    }

    fn notice(&mut self, message: &str) {
        if !self.ctx.quiet {
            self.badge_line(Badge::Info, message);
        }
    }
}

/// How a console session ended.
#[derive(Debug)]
pub struct SessionEnd {
    pub flow: Flow,
    /// Set when reading input failed. `flow` still says whether to save.
    pub read_error: Option<io::Error>,
}

/// Feed `input` to the session until it exits or input runs out.
///
/// Lines that are not valid UTF-8 are decoded lossily. A read error ends the
/// session like end of input, so records stored so far are still saved.
pub fn run_session<C, R, O, E>(
    session: &mut Session<C>,
    mut input: R,
    sink: &mut ConsoleSink<O, E>,
    prompts: &Prompts,
) -> SessionEnd
where
    C: Clock,
    R: BufRead,
    O: Write,
    E: Write,
{
    let mut buf = Vec::new();
    loop {
        sink.prompt(prompts.for_mode(session.mode()));
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => {
                return SessionEnd {
                    flow: session.finish(sink),
                    read_error: None,
                }
            }
            Ok(_) => {}
            Err(err) => {
                return SessionEnd {
                    flow: session.finish(sink),
                    read_error: Some(err),
                }
            }
        }
        let line = decode_line(&buf);
        let flow = session.feed(&line, sink);
        if flow != Flow::Continue {
            return SessionEnd {
                flow,
                read_error: None,
            };
        }
    }
}

/// Strip the line ending and decode, replacing invalid UTF-8.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    match String::from_utf8_lossy(raw) {
        std::borrow::Cow::Borrowed(line) => line.to_string(),
        std::borrow::Cow::Owned(line) => {
            warn!(line = %line, "input line is not valid UTF-8; decoded lossily");
            line
        }
    }
}
