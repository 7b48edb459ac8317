// tests/real_process.rs
#![cfg(unix)]

use std::sync::Arc;

use rerun::errors::RerunError;
use rerun::exec::{CommandRunner, ExecutorBackend, PosixPlatform, RealExecutorBackend};
use rerun::types::{Invocation, RunOutcome};
use rerun_test_utils::init_tracing;
use rerun_test_utils::recording::RecordingTerminal;

#[tokio::test]
async fn exit_codes_are_reported() -> anyhow::Result<()> {
    init_tracing();
    let mut backend = RealExecutorBackend::new();

    let ok = backend
        .execute(Invocation::new("/bin/sh", ["-c", "exit 0"]))
        .await?;
    let failed = backend
        .execute(Invocation::new("/bin/sh", ["-c", "exit 3"]))
        .await?;

    assert_eq!(ok, RunOutcome::Success);
    assert_eq!(failed, RunOutcome::Failed(3));
    Ok(())
}

#[tokio::test]
async fn missing_program_is_a_spawn_error() {
    init_tracing();
    let mut backend = RealExecutorBackend::new();

    let err = backend
        .execute(Invocation::new("/definitely/not/a/program", Vec::<String>::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, RerunError::Spawn { ref program, .. } if program == "/definitely/not/a/program"));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn shell_interprets_the_command_line() -> anyhow::Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let target = dir.path().join("out.txt");
    let command = format!("echo hello | tr a-z A-Z > '{}'", target.display());

    let mut runner = CommandRunner::new(
        RealExecutorBackend::new(),
        Arc::new(PosixPlatform),
        Arc::new(RecordingTerminal::new()),
        Some("/bin/sh".to_string()),
        false,
    );
    let outcome = runner.run_command(&command).await?;

    assert_eq!(outcome, RunOutcome::Success);
    assert_eq!(std::fs::read_to_string(&target)?.trim(), "HELLO");
    Ok(())
}
