// src/exec/runner.rs

//! Command runner: turns the user's command string into a process run.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{RerunError, Result};
use crate::exec::backend::ExecutorBackend;
use crate::exec::platform::ShellPlatform;
use crate::exec::terminal::{ForegroundGuard, TerminalControl};
use crate::types::RunOutcome;

/// Runs the user's command (and the clear-screen helper) through an
/// [`ExecutorBackend`], using the platform strategy to build invocations.
pub struct CommandRunner<E: ExecutorBackend> {
    executor: E,
    platform: Arc<dyn ShellPlatform>,
    terminal: Arc<dyn TerminalControl>,
    shell: Option<String>,
    interactive: bool,
}

impl<E: ExecutorBackend> fmt::Debug for CommandRunner<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRunner")
            .field("platform", &self.platform.name())
            .field("shell", &self.shell)
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> CommandRunner<E> {
    pub fn new(
        executor: E,
        platform: Arc<dyn ShellPlatform>,
        terminal: Arc<dyn TerminalControl>,
        shell: Option<String>,
        interactive: bool,
    ) -> Self {
        Self {
            executor,
            platform,
            terminal,
            shell,
            interactive,
        }
    }

    /// Clear the terminal. Failure only costs a cluttered screen, so it is
    /// logged and swallowed.
    pub async fn clear_screen(&mut self) {
        let invocation = self.platform.clear_screen();
        match self.executor.execute(invocation).await {
            Ok(outcome) if !outcome.is_success() => {
                debug!(?outcome, "clear screen command failed");
            }
            Ok(_) => {}
            Err(err) => debug!(error = %err, "could not clear screen"),
        }
    }

    /// Run `command` once and wait for it.
    ///
    /// In interactive mode the terminal's foreground process group is
    /// reclaimed afterwards on every path, including when the shell cannot
    /// be launched. Launch errors are returned, not swallowed.
    pub async fn run_command(&mut self, command: &str) -> Result<RunOutcome> {
        let shell = self.shell.as_deref();

        if !self.interactive {
            let invocation = self.platform.shell_command(command, shell);
            return self.executor.execute(invocation).await;
        }

        let invocation = self
            .platform
            .interactive_command(command, shell)
            .ok_or(RerunError::InteractiveUnsupported(self.platform.name()))?;

        info!(%invocation, "running command in interactive shell");
        let _guard = ForegroundGuard::new(self.terminal.as_ref());
        self.executor.execute(invocation).await
    }
}
