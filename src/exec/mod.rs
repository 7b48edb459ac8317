// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the user's command,
//! using `tokio::process::Command`, and for the platform details around it.
//!
//! - [`platform`] is the per-OS strategy: how to clear the screen and how to
//!   hand a command string to a shell.
//! - [`terminal`] gives the controlling terminal back after an interactive
//!   shell took it.
//! - [`backend`] provides the `ExecutorBackend` trait and the concrete
//!   `RealExecutorBackend`, which tests replace with a fake.
//! - [`runner`] combines the three into `CommandRunner::run_command`.

pub mod backend;
pub mod platform;
pub mod runner;
pub mod terminal;

pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use platform::{detect as detect_platform, PosixPlatform, ShellPlatform, WindowsPlatform};
pub use runner::CommandRunner;
pub use terminal::{ControllingTerminal, ForegroundGuard, TerminalControl};
