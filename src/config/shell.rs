// src/config/shell.rs

//! Which shell runs the user's command.
//!
//! We use the shell rerun was launched from, so the command is interpreted
//! the same way it would be if the user typed it at their prompt.

use tracing::debug;

/// Resolve the shell from, in order: an explicit setting, the `SHELL`
/// variable, the passwd database. `None` means "let the platform decide".
pub fn resolve_shell<F>(explicit: Option<&str>, env_shell: Option<String>, passwd_shell: F) -> Option<String>
where
    F: FnOnce() -> Option<String>,
{
    if let Some(shell) = explicit {
        return Some(shell.to_string());
    }
    if let Some(shell) = env_shell.filter(|s| !s.is_empty()) {
        return Some(shell);
    }
    passwd_shell()
}

/// Shell for the current process, or `None` on Windows where `cmd` is used
/// unconditionally.
pub fn current_shell(explicit: Option<&str>) -> Option<String> {
    if cfg!(windows) {
        return None;
    }
    let shell = resolve_shell(explicit, std::env::var("SHELL").ok(), user_default_shell);
    debug!(?shell, "resolved command shell");
    shell
}

/// The invoking user's login shell from `/etc/passwd` (or NSS).
#[cfg(unix)]
pub fn user_default_shell() -> Option<String> {
    use std::ffi::CStr;

    // SAFETY: getpwuid returns a pointer into static storage or null; we
    // copy the shell string out before any other passwd call can reuse it.
    unsafe {
        let entry = libc::getpwuid(libc::getuid());
        if entry.is_null() || (*entry).pw_shell.is_null() {
            return None;
        }
        let shell = CStr::from_ptr((*entry).pw_shell).to_string_lossy().into_owned();
        if shell.is_empty() { None } else { Some(shell) }
    }
}

#[cfg(not(unix))]
pub fn user_default_shell() -> Option<String> {
    None
}
