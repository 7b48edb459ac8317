// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{current_shell, load_and_validate, Options};
use crate::engine::{PollCore, Runtime, RuntimeEvent, RuntimeOptions};
use crate::errors::Result;
use crate::exec::terminal::ignore_background_tty_signals;
use crate::exec::{CommandRunner, ControllingTerminal, RealExecutorBackend, ShellPlatform};
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::TreeScanner;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and option resolution
/// - the tree scanner over the current directory
/// - the command runner for this platform
/// - Ctrl-C handling
/// - the poll loop
pub async fn run(args: CliArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => Some(load_and_validate(path)?),
        None => None,
    };

    let platform = exec::detect_platform();
    let options = Options::resolve(&args, file.as_ref(), platform.as_ref(), current_shell)?;

    watch(options, platform).await
}

/// Watch the current directory with already-resolved options until Ctrl-C.
pub async fn watch(options: Options, platform: Arc<dyn ShellPlatform>) -> Result<()> {
    info!(
        command = %options.command,
        interactive = options.interactive,
        shell = ?options.shell,
        ignore = ?options.ignore.names(),
        "starting rerun"
    );

    // The terminal comes back to us after an interactive shell exits only if
    // SIGTTOU is not allowed to stop us first.
    ignore_background_tty_signals();

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let scanner = TreeScanner::new(".", fs, options.ignore.clone());

    let runner = CommandRunner::new(
        RealExecutorBackend::new(),
        platform,
        Arc::new(ControllingTerminal),
        options.shell.clone(),
        options.interactive,
    );

    let core = PollCore::new(options.command.clone(), options.verbose);

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(4);

    // Ctrl-C → graceful shutdown.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        debug!("Ctrl+C received");
        let _ = rt_tx.send(RuntimeEvent::ShutdownRequested).await;
    });

    let runtime = Runtime::new(
        core,
        scanner,
        runner,
        Box::new(std::io::stdout()),
        RuntimeOptions {
            poll_interval: options.poll_interval,
        },
        rt_rx,
    );
    runtime.run().await
}
