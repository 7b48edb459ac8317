// src/engine/core.rs

//! Pure core of the poll loop.
//!
//! [`PollCore`] consumes the result of one scan and returns the commands the
//! IO shell should carry out. It has no channels, no Tokio types, and does
//! not perform any IO, so the Idle/Acting transitions and the first-cycle
//! rule are unit-testable on their own.

use std::path::PathBuf;

use crate::engine::{CoreCommand, CoreStep, PollState};

#[derive(Debug, Clone)]
pub struct PollCore {
    command: String,
    verbose: bool,
    state: PollState,
    first_cycle: bool,
}

impl PollCore {
    pub fn new(command: impl Into<String>, verbose: bool) -> Self {
        Self {
            command: command.into(),
            verbose,
            state: PollState::Idle,
            first_cycle: true,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// True until the first scan result has been handled.
    pub fn is_first_cycle(&self) -> bool {
        self.first_cycle
    }

    /// Handle the files one scan reported as changed.
    ///
    /// An empty list keeps the core Idle and yields no commands. Anything
    /// else moves it to Acting and yields: clear screen, print the command,
    /// (verbose, not first cycle) print the sorted changed files, run the
    /// command. The file list is withheld on the first cycle because every
    /// file in the tree is new then.
    pub fn on_scan(&mut self, changed: &[PathBuf]) -> CoreStep {
        let first_cycle = std::mem::replace(&mut self.first_cycle, false);

        if changed.is_empty() {
            return CoreStep::default();
        }

        self.state = PollState::Acting;

        let mut commands = vec![
            CoreCommand::ClearScreen,
            CoreCommand::PrintCommand(self.command.clone()),
        ];

        if self.verbose && !first_cycle {
            let mut names: Vec<String> = changed
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
            names.sort();
            commands.push(CoreCommand::PrintChangedFiles(names));
        }

        commands.push(CoreCommand::RunCommand(self.command.clone()));

        CoreStep { commands }
    }

    /// The shell finished carrying out an Acting step.
    pub fn on_action_finished(&mut self) {
        self.state = PollState::Idle;
    }
}
