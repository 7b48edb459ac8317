// src/config/model.rs

use serde::Deserialize;

/// Optional configuration file, as read from TOML.
///
/// ```toml
/// [watch]
/// ignore = ["fixtures", "notes.md"]
/// poll_interval_ms = 200
///
/// [command]
/// verbose = true
/// interactive = false
/// shell = "/bin/zsh"
/// ```
///
/// All sections and keys are optional. Unknown keys are rejected so typos
/// don't silently do nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub command: CommandSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Extra names to ignore, applied before any `--ignore` flags.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Pause between scans, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    crate::engine::DEFAULT_POLL_INTERVAL.as_millis() as u64
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// `[command]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSection {
    /// Turn on verbose output (the CLI flag can only add, not remove, it).
    #[serde(default)]
    pub verbose: bool,

    /// Run the command in an interactive shell.
    #[serde(default)]
    pub interactive: bool,

    /// Shell executable; overrides `SHELL` and the passwd entry.
    #[serde(default)]
    pub shell: Option<String>,
}

/// Validated configuration file.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub(crate) watch: WatchSection,
    pub(crate) command: CommandSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(watch: WatchSection, command: CommandSection) -> Self {
        Self { watch, command }
    }

    pub fn watch(&self) -> &WatchSection {
        &self.watch
    }

    pub fn command(&self) -> &CommandSection {
        &self.command
    }
}
