// src/config/mod.rs

//! Configuration for rerun.
//!
//! Responsibilities:
//! - Define the optional TOML file's data model (`model.rs`).
//! - Load it from disk (`loader.rs`) and validate it (`validate.rs`).
//! - Discover the user's shell (`shell.rs`).
//! - Merge CLI arguments and the file into `Options` (`options.rs`).

pub mod loader;
pub mod model;
pub mod options;
pub mod shell;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_from_str};
pub use model::{CommandSection, ConfigFile, RawConfigFile, WatchSection};
pub use options::Options;
pub use shell::current_shell;
pub use validate::validate_config;
