// src/config/options.rs

use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::errors::{RerunError, Result};
use crate::exec::ShellPlatform;
use crate::watch::IgnoreSet;

/// Fully-resolved settings for one watch session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub command: String,
    pub verbose: bool,
    pub ignore: IgnoreSet,
    pub interactive: bool,
    /// `None` lets the platform pick its interpreter.
    pub shell: Option<String>,
    pub poll_interval: Duration,
}

impl Options {
    /// Merge CLI arguments over an optional config file and validate.
    ///
    /// Ignore order is: built-in directories, config file entries, then
    /// `--ignore` values. Booleans are OR-ed. `shell_lookup` receives the
    /// config file's explicit shell, if any.
    pub fn resolve<F>(
        args: &CliArgs,
        file: Option<&ConfigFile>,
        platform: &dyn ShellPlatform,
        shell_lookup: F,
    ) -> Result<Self>
    where
        F: FnOnce(Option<&str>) -> Option<String>,
    {
        let command = args.command_line();
        if command.trim().is_empty() {
            return Err(RerunError::NoCommand);
        }

        let defaults = ConfigFile::default();
        let file = file.unwrap_or(&defaults);

        let interactive = args.interactive || file.command().interactive;
        if interactive && !platform.supports_interactive() {
            return Err(RerunError::InteractiveUnsupported(platform.name()));
        }

        let ignore = IgnoreSet::with_extra(
            file.watch()
                .ignore
                .iter()
                .chain(args.ignore.iter())
                .cloned(),
        );

        Ok(Self {
            command,
            verbose: args.verbose || file.command().verbose,
            ignore,
            interactive,
            shell: shell_lookup(file.command().shell.as_deref()),
            poll_interval: Duration::from_millis(file.watch().poll_interval_ms),
        })
    }
}
