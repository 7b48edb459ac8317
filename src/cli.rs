// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The command is a trailing var-arg: the first token that is not one of
//! rerun's own options starts it, and everything from there on belongs to
//! the command even if it looks like a rerun flag (`rerun ls -v` runs
//! `ls -v`; it does not turn on verbose mode).

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser, ValueEnum};

use crate::watch::{SKIP_DIRS, SKIP_EXT};

/// Command-line arguments for `rerun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rerun",
    version,
    about = "Re-runs the given command every time files are modified in the current directory or its subdirectories.",
    long_about = None
)]
pub struct CliArgs {
    /// Display the names of changed files before the command output.
    #[arg(short, long)]
    pub verbose: bool,

    /// File or directory to ignore. Directories of this name (and their
    /// subdirs) are not searched; files of this name never trigger a rerun.
    /// Compared to basenames: `--ignore def` skips `./abc/def/` and ignores
    /// `./ghi/def`. Can be given multiple times.
    #[arg(short, long, value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Run the command in an interactive shell, so shell aliases and
    /// functions work. Slower and noisier, since the shell sources its rc
    /// files first. Not available on Windows.
    #[arg(short = 'I', long)]
    pub interactive: bool,

    /// Optional TOML file with extra ignores, poll interval and shell.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RERUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command to execute. Everything from the first unrecognised argument
    /// onwards is part of the command.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub command: Vec<String>,
}

impl CliArgs {
    /// The command as one string. A single token is used verbatim; several
    /// are joined with spaces.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Text appended to `--help`.
pub fn epilog() -> String {
    format!(
        "Always ignores directories: {}\nAlways ignores files with extensions: {}",
        SKIP_DIRS.join(", "),
        SKIP_EXT.join(", ")
    )
}

/// The clap command, including the always-ignored epilog.
pub fn command() -> clap::Command {
    CliArgs::command().after_help(epilog())
}

/// Parse from an explicit argument list (first item is the program name).
pub fn try_parse_from<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    CliArgs::from_arg_matches(&matches)
}

/// Convenience wrapper used by `main`; exits on `--help`, `--version` and
/// parse errors the way clap does.
pub fn parse() -> CliArgs {
    try_parse_from(std::env::args_os()).unwrap_or_else(|err| err.exit())
}
