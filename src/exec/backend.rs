// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The runner talks to an `ExecutorBackend` instead of spawning processes
//! itself. This makes it easy to swap in a fake executor in tests while
//! keeping the production implementation here.

use std::future::Future;
use std::pin::Pin;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{RerunError, Result};
use crate::types::{Invocation, RunOutcome};

/// Trait abstracting how an invocation is executed.
///
/// Production code uses [`RealExecutorBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ExecutorBackend: Send {
    /// Run `invocation` to completion.
    ///
    /// A process that starts and exits non-zero is `Ok(RunOutcome::Failed)`;
    /// only failing to start at all is an `Err`.
    fn execute(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + '_>>;
}

/// Real executor backend used in production.
///
/// The child inherits stdin/stdout/stderr so the user's command owns the
/// terminal while it runs. There is no timeout: the poll loop waits for as
/// long as the command takes.
#[derive(Debug, Clone, Default)]
pub struct RealExecutorBackend;

impl RealExecutorBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn execute(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + '_>> {
        Box::pin(async move {
            debug!(%invocation, "spawning process");

            let status = Command::new(&invocation.program)
                .args(&invocation.args)
                .status()
                .await
                .map_err(|source| RerunError::Spawn {
                    program: invocation.program.clone(),
                    source,
                })?;

            let outcome = RunOutcome::from_code(status.code());
            info!(
                program = %invocation.program,
                exit_code = status.code().unwrap_or(-1),
                success = status.success(),
                "process exited"
            );
            Ok(outcome)
        })
    }
}
