use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use rerun::errors::{RerunError, Result};
use rerun::exec::ExecutorBackend;
use rerun::types::{Invocation, RunOutcome};

/// What the fake does for one `execute` call.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Exit(RunOutcome),
    /// Behave as if the program could not be started.
    SpawnError(io::ErrorKind),
}

/// A fake executor that:
/// - records every invocation it was asked to run
/// - answers from a script of responses, then `Exit(Success)` forever.
///
/// Clear-screen invocations go through the same backend, so they are
/// recorded (and consume scripted responses) too.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<Invocation>>>,
    script: Arc<Mutex<VecDeque<FakeResponse>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue responses for the next `execute` calls, in order.
    pub fn with_responses<I>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = FakeResponse>,
    {
        self.script.lock().unwrap().extend(responses);
        self
    }

    /// Handle to the recorded invocations that survives moving the fake
    /// into a runner.
    pub fn executed(&self) -> Arc<Mutex<Vec<Invocation>>> {
        Arc::clone(&self.executed)
    }

    /// Invocations recorded so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.executed.lock().unwrap().clone()
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);
        let script = Arc::clone(&self.script);

        Box::pin(async move {
            let program = invocation.program.clone();
            {
                let mut guard = executed.lock().unwrap();
                guard.push(invocation);
            }

            let response = script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(FakeResponse::Exit(RunOutcome::Success));

            match response {
                FakeResponse::Exit(outcome) => Ok(outcome),
                FakeResponse::SpawnError(kind) => Err(RerunError::Spawn {
                    program,
                    source: io::Error::new(kind, "fake spawn failure"),
                }),
            }
        })
    }
}
