// src/watch/tracker.rs

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::types::Fingerprint;

/// In-memory record of the last fingerprint seen for every tracked file.
///
/// Owned by a single scanner; nothing is persisted between runs.
#[derive(Debug)]
pub struct ChangeTracker {
    fs: Arc<dyn FileSystem>,
    records: HashMap<PathBuf, Fingerprint>,
}

impl ChangeTracker {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            records: HashMap::new(),
        }
    }

    /// Has `path` changed since the last call for the same path?
    ///
    /// - unseen path, or fingerprint differs: record it, return true;
    /// - file gone (`NotFound`): forget it, return true;
    /// - any other stat error: log, keep the old record, return false.
    ///
    /// Callers must invoke this for every file of every scan, even after an
    /// earlier file already reported a change. A skipped call leaves a stale
    /// record that shows up as a spurious change on a later scan.
    pub fn has_file_changed(&mut self, path: &Path) -> bool {
        let current = match self.fs.stat(path) {
            Ok(fp) => fp,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if self.records.remove(path).is_some() {
                    debug!(path = %path.display(), "file vanished; record dropped");
                }
                return true;
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "cannot stat file; skipping it this cycle"
                );
                return false;
            }
        };

        match self.records.get(path) {
            Some(previous) if *previous == current => false,
            _ => {
                debug!(path = %path.display(), ?current, "fingerprint updated");
                self.records.insert(path.to_path_buf(), current);
                true
            }
        }
    }

    /// Drop every record whose path is not in `seen`, unless `keep` says
    /// otherwise. Returns how many records were dropped.
    ///
    /// Called once per scan so files deleted between two scans do not stay
    /// in memory for the life of the process.
    pub fn forget_unseen<F>(&mut self, seen: &HashSet<PathBuf>, keep: F) -> usize
    where
        F: Fn(&Path) -> bool,
    {
        let before = self.records.len();
        self.records
            .retain(|path, _| seen.contains(path) || keep(path));
        before - self.records.len()
    }

    /// Last recorded fingerprint for `path`, if any.
    pub fn fingerprint(&self, path: &Path) -> Option<&Fingerprint> {
        self.records.get(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
