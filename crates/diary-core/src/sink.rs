//! Where a session sends what it has to say.
//!
//! The session never prints. Reports, diagnostics and notices go through a
//! [`Sink`]; the CLI renders them on the console, tests collect them in a
//! [`MemorySink`].

use crate::parser::Diagnostic;
use crate::report::ReportOutput;

/// Display collaborator for a session.
pub trait Sink {
    /// Output of a command script report.
    fn report(&mut self, output: &ReportOutput);

    /// A recoverable problem with the last line.
    fn diagnostic(&mut self, diagnostic: &Diagnostic);

    /// Informational message, such as a stored record.
    fn notice(&mut self, message: &str);
}

/// Anything a session emitted, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Report(ReportOutput),
    Diagnostic(Diagnostic),
    Notice(String),
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<Event>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Diagnostic(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn reports(&self) -> Vec<&ReportOutput> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Report(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Notice(n) => Some(n.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Sink for MemorySink {
    fn report(&mut self, output: &ReportOutput) {
        self.events.push(Event::Report(output.clone()));
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.events.push(Event::Diagnostic(diagnostic.clone()));
    }

    fn notice(&mut self, message: &str) {
        self.events.push(Event::Notice(message.to_string()));
    }
}
