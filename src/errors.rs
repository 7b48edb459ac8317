// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RerunError {
    #[error("No command specified.")]
    NoCommand,

    #[error("Interactive mode is not available on {0}.")]
    InteractiveUnsupported(&'static str),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RerunError {
    /// Process exit status for this error.
    ///
    /// Argument and configuration problems exit with 2, like a usage error;
    /// everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            RerunError::NoCommand
            | RerunError::InteractiveUnsupported(_)
            | RerunError::ConfigError(_)
            | RerunError::TomlError(_) => 2,
            _ => 1,
        }
    }

    /// True for errors caused by how rerun was invoked rather than by
    /// something going wrong at runtime.
    pub fn is_usage_error(&self) -> bool {
        self.exit_code() == 2
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RerunError>;
