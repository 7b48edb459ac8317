// src/exec/platform.rs

//! Platform-specific shell behaviour, chosen once at startup.
//!
//! The poll loop never checks the target OS itself; it asks the selected
//! [`ShellPlatform`] how to clear the screen and how to wrap the user's
//! command.

use std::fmt::Debug;
use std::sync::Arc;

use crate::types::Invocation;

/// Shell used on POSIX when neither the config, `SHELL`, nor the passwd
/// database names one.
pub const FALLBACK_POSIX_SHELL: &str = "/bin/sh";

pub trait ShellPlatform: Send + Sync + Debug {
    /// Human-readable platform name, used in error messages.
    fn name(&self) -> &'static str;

    /// Command that clears the terminal.
    fn clear_screen(&self) -> Invocation;

    /// Wrap `command` so the platform interpreter parses it (pipes,
    /// redirects and globs are the shell's business, not ours).
    fn shell_command(&self, command: &str, shell: Option<&str>) -> Invocation;

    /// Wrap `command` in an interactive shell so aliases and functions from
    /// the user's rc files are available. `None` when unsupported.
    fn interactive_command(&self, command: &str, shell: Option<&str>) -> Option<Invocation>;

    fn supports_interactive(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PosixPlatform;

impl ShellPlatform for PosixPlatform {
    fn name(&self) -> &'static str {
        "POSIX"
    }

    fn clear_screen(&self) -> Invocation {
        Invocation::new("clear", Vec::<String>::new())
    }

    fn shell_command(&self, command: &str, shell: Option<&str>) -> Invocation {
        let shell = shell.unwrap_or(FALLBACK_POSIX_SHELL);
        Invocation::new(shell, ["-c", command])
    }

    fn interactive_command(&self, command: &str, shell: Option<&str>) -> Option<Invocation> {
        let shell = shell.unwrap_or(FALLBACK_POSIX_SHELL);
        Some(Invocation::new(shell, ["-i", "-c", command]))
    }

    fn supports_interactive(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsPlatform;

impl ShellPlatform for WindowsPlatform {
    fn name(&self) -> &'static str {
        "Windows"
    }

    fn clear_screen(&self) -> Invocation {
        Invocation::new("cmd", ["/C", "cls"])
    }

    // `shell` is ignored: cmd.exe is always the interpreter here.
    fn shell_command(&self, command: &str, _shell: Option<&str>) -> Invocation {
        Invocation::new("cmd", ["/C", command])
    }

    fn interactive_command(&self, _command: &str, _shell: Option<&str>) -> Option<Invocation> {
        None
    }

    fn supports_interactive(&self) -> bool {
        false
    }
}

/// Pick the strategy for the platform this binary was built for.
pub fn detect() -> Arc<dyn ShellPlatform> {
    if cfg!(windows) {
        Arc::new(WindowsPlatform)
    } else {
        Arc::new(PosixPlatform)
    }
}
