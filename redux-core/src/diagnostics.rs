//! Collected, non-fatal input problems.
//!
//! Readers never abort on a bad line or an unreadable kit file. Instead they push a
//! [`Diagnostic`] and keep going; the log is surfaced once per phase through [`Diagnostics::report`].
use std::fmt::{self, Display};

use fxhash::FxHashMap;
use log::{debug, warn};

use crate::errors::ReduxError;

/// The processing phase a diagnostic was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Discovery,
    Corrections,
    Coverage,
    Calls,
    SnpReference,
    Tree,
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Discovery => "discovery",
            Phase::Corrections => "corrections",
            Phase::Coverage => "coverage",
            Phase::Calls => "calls",
            Phase::SnpReference => "snp-reference",
            Phase::Tree => "tree",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
pub struct Diagnostic {
    pub phase: Phase,
    /// File path or kit name the problem came from
    pub source: String,
    /// 1-based line number, when the problem is tied to a line
    pub line: Option<usize>,
    pub error: ReduxError,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[{}] {}:{}: {}", self.phase, self.source, line, self.error),
            None => write!(f, "[{}] {}: {}", self.phase, self.source, self.error),
        }
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    // per phase, how many diagnostics have already been logged
    reported: FxHashMap<Phase, usize>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Record a problem found at a given line of `source`.
    pub fn record(
        &mut self,
        phase: Phase,
        source: impl Into<String>,
        line: Option<usize>,
        error: ReduxError,
    ) {
        self.push(Diagnostic {
            phase,
            source: source.into(),
            line,
            error,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn in_phase(&self, phase: Phase) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.phase == phase)
    }

    /// Log what `phase` collected since its last report: one warning with the count,
    /// then each diagnostic at debug level. Returns the number logged.
    pub fn report(&mut self, phase: Phase) -> usize {
        let seen = self.reported.get(&phase).copied().unwrap_or(0);
        let total = self.in_phase(phase).count();
        let count = total - seen;
        if count == 0 {
            return 0;
        }
        warn!("{} problem(s) skipped during {}; rerun with -vv for details", count, phase);
        for diagnostic in self.in_phase(phase).skip(seen) {
            debug!("{}", diagnostic);
        }
        self.reported.insert(phase, total);
        count
    }
}
