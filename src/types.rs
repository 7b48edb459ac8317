// src/types.rs

use std::fmt;
use std::time::SystemTime;

/// Snapshot of a file used to decide whether it changed between scans.
///
/// Both size and modification time take part in the comparison, so an edit
/// that keeps the mtime (coarse filesystem clocks) but changes the length is
/// still noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl Fingerprint {
    pub fn new(size: u64, modified: Option<SystemTime>) -> Self {
        Self { size, modified }
    }
}

/// A fully-resolved process invocation: program plus argument vector.
///
/// The platform strategy builds these; the executor backend spawns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Outcome of one command run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    /// Non-zero exit. `-1` when the process was killed by a signal.
    Failed(i32),
}

impl RunOutcome {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => RunOutcome::Success,
            Some(code) => RunOutcome::Failed(code),
            None => RunOutcome::Failed(-1),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }
}
