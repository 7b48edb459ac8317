// src/engine/runtime.rs

use std::fmt;
use std::io::Write;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::errors::Result;
use crate::exec::{CommandRunner, ExecutorBackend};
use crate::types::RunOutcome;
use crate::watch::TreeScanner;

use super::core::PollCore;
use super::{CoreCommand, CycleOutcome, RuntimeEvent, RuntimeOptions};

/// Drives the poll loop: scans through the `TreeScanner`, feeds the result
/// to the `PollCore`, and carries out the returned commands.
///
/// Everything happens on one task, in order. While the user's command runs
/// nothing else does; polling resumes when it exits.
pub struct Runtime<E: ExecutorBackend> {
    core: PollCore,
    scanner: TreeScanner,
    runner: CommandRunner<E>,
    out: Box<dyn Write + Send>,
    options: RuntimeOptions,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl<E: ExecutorBackend> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Runtime<E> {
    pub fn new(
        core: PollCore,
        scanner: TreeScanner,
        runner: CommandRunner<E>,
        out: Box<dyn Write + Send>,
        options: RuntimeOptions,
        event_rx: mpsc::Receiver<RuntimeEvent>,
    ) -> Self {
        Self {
            core,
            scanner,
            runner,
            out,
            options,
            event_rx,
        }
    }

    /// Main loop: cycle, sleep, repeat.
    ///
    /// Returns `Ok(())` only after a `ShutdownRequested` event. A closed
    /// event channel just means nobody can ask us to stop any more.
    pub async fn run(mut self) -> Result<()> {
        info!(
            root = %self.scanner.root().display(),
            interval_ms = self.options.poll_interval.as_millis() as u64,
            "rerun poll loop started"
        );

        let mut events_open = true;

        loop {
            self.run_cycle().await?;

            tokio::select! {
                _ = sleep(self.options.poll_interval) => {}
                event = self.event_rx.recv(), if events_open => match event {
                    Some(RuntimeEvent::ShutdownRequested) => {
                        info!("shutdown requested; stopping poll loop");
                        break;
                    }
                    None => {
                        debug!("runtime event channel closed");
                        events_open = false;
                    }
                },
            }
        }

        Ok(())
    }

    /// One poll cycle without the trailing sleep.
    ///
    /// Scan failures and command failures are logged and reported in the
    /// returned outcome; only failing to write to the output is an error.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let changed = match self.scanner.get_changed_files() {
            Ok(changed) => changed,
            Err(err) => {
                error!(error = %err, "scan failed; retrying next cycle");
                return Ok(CycleOutcome::ScanFailed);
            }
        };

        let step = self.core.on_scan(&changed);
        if step.is_empty() {
            return Ok(CycleOutcome::Idle);
        }

        debug!(changed = changed.len(), "changes detected");

        let mut run_outcome = None;
        for command in step.commands {
            if let Some(outcome) = self.execute_command(command).await? {
                run_outcome = Some(outcome);
            }
        }

        self.core.on_action_finished();
        Ok(CycleOutcome::Acted(run_outcome))
    }

    /// Execute a single command from the core. Returns the run outcome for
    /// `RunCommand` when the process could be launched.
    async fn execute_command(
        &mut self,
        command: CoreCommand,
    ) -> Result<Option<RunOutcome>> {
        match command {
            CoreCommand::ClearScreen => {
                self.runner.clear_screen().await;
            }
            CoreCommand::PrintCommand(cmd) => {
                writeln!(self.out, "{cmd}")?;
                self.out.flush()?;
            }
            CoreCommand::PrintChangedFiles(files) => {
                writeln!(self.out, "{}", files.join(", "))?;
                self.out.flush()?;
            }
            CoreCommand::RunCommand(cmd) => {
                return Ok(self.run_user_command(&cmd).await);
            }
        }
        Ok(None)
    }

    async fn run_user_command(&mut self, cmd: &str) -> Option<RunOutcome> {
        match self.runner.run_command(cmd).await {
            Ok(outcome) => {
                if !outcome.is_success() {
                    info!(?outcome, "command failed; still watching");
                }
                Some(outcome)
            }
            Err(err) => {
                error!(error = %err, "could not run command; still watching");
                None
            }
        }
    }
}
