#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use rerun::cli::CliArgs;
use rerun::engine::{PollCore, Runtime, RuntimeEvent, RuntimeOptions};
use rerun::exec::{CommandRunner, PosixPlatform, ShellPlatform};
use rerun::fs::mock::MockFileSystem;
use rerun::fs::FileSystem;
use rerun::types::Invocation;
use rerun::watch::{IgnoreSet, TreeScanner};

use crate::fake_executor::FakeExecutor;
use crate::recording::{RecordingTerminal, SharedBuffer};

/// Builder for `CliArgs` to simplify test setup.
pub struct CliArgsBuilder {
    args: CliArgs,
}

impl CliArgsBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            args: CliArgs {
                verbose: false,
                ignore: Vec::new(),
                interactive: false,
                config: None,
                log_level: None,
                command: if command.is_empty() {
                    Vec::new()
                } else {
                    vec![command.to_string()]
                },
            },
        }
    }

    pub fn verbose(mut self, val: bool) -> Self {
        self.args.verbose = val;
        self
    }

    pub fn interactive(mut self, val: bool) -> Self {
        self.args.interactive = val;
        self
    }

    pub fn ignore(mut self, name: &str) -> Self {
        self.args.ignore.push(name.to_string());
        self
    }

    pub fn build(self) -> CliArgs {
        self.args
    }
}

/// Everything a runtime test needs to drive and inspect one poll loop.
pub struct RuntimeHarness {
    pub runtime: Runtime<FakeExecutor>,
    pub fs: MockFileSystem,
    pub executed: Arc<Mutex<Vec<Invocation>>>,
    pub terminal: Arc<RecordingTerminal>,
    pub out: SharedBuffer,
    pub events: mpsc::Sender<RuntimeEvent>,
}

impl RuntimeHarness {
    /// Invocations recorded so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.executed.lock().unwrap().clone()
    }

    /// Recorded invocations minus the clear-screen helper.
    pub fn command_runs(&self) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|inv| inv.program != "clear")
            .collect()
    }
}

/// Builder for a `Runtime` backed by a mock tree, a fake executor and a
/// recording terminal. Uses the POSIX strategy with `/bin/sh` by default.
pub struct RuntimeBuilder {
    command: String,
    verbose: bool,
    interactive: bool,
    ignores: Vec<String>,
    shell: Option<String>,
    fs: MockFileSystem,
    executor: FakeExecutor,
    platform: Arc<dyn ShellPlatform>,
    poll_interval: Duration,
}

impl RuntimeBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            verbose: false,
            interactive: false,
            ignores: Vec::new(),
            shell: Some("/bin/sh".to_string()),
            fs: MockFileSystem::new(),
            executor: FakeExecutor::new(),
            platform: Arc::new(PosixPlatform),
            poll_interval: Duration::from_millis(10),
        }
    }

    pub fn verbose(mut self, val: bool) -> Self {
        self.verbose = val;
        self
    }

    pub fn interactive(mut self, val: bool) -> Self {
        self.interactive = val;
        self
    }

    pub fn ignore(mut self, name: &str) -> Self {
        self.ignores.push(name.to_string());
        self
    }

    pub fn shell(mut self, shell: Option<&str>) -> Self {
        self.shell = shell.map(str::to_string);
        self
    }

    pub fn with_fs(mut self, fs: MockFileSystem) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_executor(mut self, executor: FakeExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_platform(mut self, platform: Arc<dyn ShellPlatform>) -> Self {
        self.platform = platform;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn build(self) -> RuntimeHarness {
        let fs_handle: Arc<dyn FileSystem> = Arc::new(self.fs.clone());
        let scanner = TreeScanner::new(".", fs_handle, IgnoreSet::with_extra(self.ignores));

        let executed = self.executor.executed();
        let terminal = Arc::new(RecordingTerminal::new());
        let runner = CommandRunner::new(
            self.executor,
            self.platform,
            terminal.clone(),
            self.shell,
            self.interactive,
        );

        let out = SharedBuffer::new();
        let (events, event_rx) = mpsc::channel(4);

        let runtime = Runtime::new(
            PollCore::new(self.command, self.verbose),
            scanner,
            runner,
            Box::new(out.clone()),
            RuntimeOptions {
                poll_interval: self.poll_interval,
            },
            event_rx,
        );

        RuntimeHarness {
            runtime,
            fs: self.fs,
            executed,
            terminal,
            out,
            events,
        }
    }
}
