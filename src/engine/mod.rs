// src/engine/mod.rs

//! Orchestration engine for rerun.
//!
//! One poll cycle is: scan the tree, and if anything changed clear the
//! screen, print the command (and, in verbose mode, the changed files), run
//! the command, then sleep. The loop never ends on its own; it stops on a
//! shutdown request (Ctrl-C) or an unrecoverable output error.
//!
//! The pure state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::time::Duration;

use crate::types::RunOutcome;

/// Default pause between two scans.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// The two states of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Nothing pending.
    Idle,
    /// A change was found and is being reacted to.
    Acting,
}

/// Something the IO shell must do on behalf of the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    ClearScreen,
    PrintCommand(String),
    /// Already sorted.
    PrintChangedFiles(Vec<String>),
    RunCommand(String),
}

/// Commands produced by one core step, to be carried out in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
}

impl CoreStep {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Runtime options for the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    pub poll_interval: Duration,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Events flowing into the runtime from outside the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// What one call to [`Runtime::run_cycle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing changed.
    Idle,
    /// The command ran. `None` when it could not be launched.
    Acted(Option<RunOutcome>),
    /// The scan itself failed; nothing ran.
    ScanFailed,
}

pub mod core;
pub mod runtime;

pub use self::core::PollCore;
pub use self::runtime::Runtime;
