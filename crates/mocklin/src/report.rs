use std::cell::RefCell;
use std::fmt;
use std::panic::Location;

/// A source location, captured where a mock is constructed and where a
/// verification is requested, so failures point at the test line that
/// caused them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub file: &'static str,
    pub line: u32,
}

impl Site {
    #[track_caller]
    pub fn caller() -> Site {
        let loc = Location::caller();
        Site {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Failure reporting collaborator. Fire-and-forget: a reported failure
/// never alters the engine's control flow, so several failures can surface
/// from a single test run.
pub trait FailureSink {
    fn fail(&self, message: &str, site: Site);
}

/// Default sink: writes `file:line: message` to stderr.
pub struct StderrSink;

impl FailureSink for StderrSink {
    fn fail(&self, message: &str, site: Site) {
        eprintln!("{site}: {message}");
    }
}

/// Buffering sink for asserting on failures in tests of the engine itself.
#[derive(Default)]
pub struct RecordingSink {
    failures: RefCell<Vec<(String, Site)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.failures
            .borrow()
            .iter()
            .map(|(msg, _)| msg.clone())
            .collect()
    }

    pub fn sites(&self) -> Vec<Site> {
        self.failures.borrow().iter().map(|(_, site)| *site).collect()
    }

    pub fn len(&self) -> usize {
        self.failures.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.borrow().is_empty()
    }
}

impl FailureSink for RecordingSink {
    fn fail(&self, message: &str, site: Site) {
        self.failures.borrow_mut().push((message.to_owned(), site));
    }
}
