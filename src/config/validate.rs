// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{RerunError, Result};

/// Shortest accepted pause between scans. Anything lower just burns CPU
/// re-statting the tree.
pub const MIN_POLL_INTERVAL_MS: u64 = 10;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RerunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.watch, raw.command))
    }
}

pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_poll_interval(cfg)?;
    validate_ignores(cfg)?;
    validate_shell(cfg)?;
    Ok(())
}

fn validate_poll_interval(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.poll_interval_ms < MIN_POLL_INTERVAL_MS {
        return Err(RerunError::ConfigError(format!(
            "watch.poll_interval_ms must be at least {MIN_POLL_INTERVAL_MS} (got {})",
            cfg.watch.poll_interval_ms
        )));
    }
    Ok(())
}

fn validate_ignores(cfg: &RawConfigFile) -> Result<()> {
    if let Some(pos) = cfg.watch.ignore.iter().position(|i| i.trim().is_empty()) {
        return Err(RerunError::ConfigError(format!(
            "watch.ignore entry {pos} is empty"
        )));
    }
    Ok(())
}

fn validate_shell(cfg: &RawConfigFile) -> Result<()> {
    if let Some(shell) = &cfg.command.shell {
        if shell.trim().is_empty() {
            return Err(RerunError::ConfigError(
                "command.shell must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}
