// src/exec/terminal.rs

//! Controlling-terminal handoff for interactive shells.
//!
//! An interactive shell makes itself the foreground process group of the
//! terminal and does not hand it back on exit. Until we take it back, any
//! read from or write to the terminal stops us with `SIGTTOU`/`SIGTTIN`.

use std::fmt::Debug;

use anyhow::Result;
use tracing::{debug, warn};

pub trait TerminalControl: Send + Sync + Debug {
    /// Make this process's group the terminal's foreground group again.
    fn reclaim_foreground(&self) -> Result<()>;
}

/// The real terminal on stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllingTerminal;

#[cfg(unix)]
impl TerminalControl for ControllingTerminal {
    fn reclaim_foreground(&self) -> Result<()> {
        // SAFETY: plain syscalls on our own process group and fd 0.
        let rc = unsafe { libc::tcsetpgrp(libc::STDIN_FILENO, libc::getpgrp()) };
        if rc != 0 {
            let err = std::io::Error::last_os_error();
            return Err(anyhow::Error::from(err).context("tcsetpgrp(stdin, getpgrp())"));
        }
        debug!("reclaimed terminal foreground process group");
        Ok(())
    }
}

#[cfg(not(unix))]
impl TerminalControl for ControllingTerminal {
    fn reclaim_foreground(&self) -> Result<()> {
        Ok(())
    }
}

/// Ignore `SIGTTOU` for the rest of the process.
///
/// We receive it when calling `tcsetpgrp` from what is, at that moment, a
/// background process group; ignoring it lets the call go through.
#[cfg(unix)]
pub fn ignore_background_tty_signals() {
    // SAFETY: installing SIG_IGN has no handler code to race with.
    let previous = unsafe { libc::signal(libc::SIGTTOU, libc::SIG_IGN) };
    if previous == libc::SIG_ERR {
        warn!("failed to ignore SIGTTOU; interactive mode may stop the watcher");
    }
}

#[cfg(not(unix))]
pub fn ignore_background_tty_signals() {}

/// Reclaims the terminal when dropped.
///
/// Held across an interactive shell run so the terminal comes back on every
/// exit path: success, failure, a launch error, a panic, or the future being
/// dropped.
pub struct ForegroundGuard<'a> {
    terminal: &'a dyn TerminalControl,
}

impl<'a> ForegroundGuard<'a> {
    pub fn new(terminal: &'a dyn TerminalControl) -> Self {
        Self { terminal }
    }
}

impl Drop for ForegroundGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.terminal.reclaim_foreground() {
            warn!(error = %err, "could not reclaim the terminal after interactive shell");
        }
    }
}
