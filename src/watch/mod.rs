// src/watch/mod.rs

//! Polling change detection.
//!
//! This module is responsible for:
//! - Deciding which paths never trigger a rerun ([`ignore`]).
//! - Remembering the last fingerprint of every file ([`tracker`]).
//! - Walking the tree once per cycle and collecting changed files
//!   ([`scanner`]).
//!
//! It does **not** run commands or sleep; the engine drives it.

pub mod ignore;
pub mod scanner;
pub mod tracker;

pub use ignore::{is_ignorable, IgnoreSet, SKIP_DIRS, SKIP_EXT};
pub use scanner::TreeScanner;
pub use tracker::ChangeTracker;
