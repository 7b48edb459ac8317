// src/watch/scanner.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::Result;
use crate::fs::{DirEntry, EntryKind, FileSystem};
use crate::watch::ignore::IgnoreSet;
use crate::watch::tracker::ChangeTracker;

/// Walks the tree under `root` once per poll cycle and reports which files
/// changed since the previous walk.
#[derive(Debug)]
pub struct TreeScanner {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    ignores: IgnoreSet,
    tracker: ChangeTracker,
}

impl TreeScanner {
    pub fn new(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>, ignores: IgnoreSet) -> Self {
        let tracker = ChangeTracker::new(Arc::clone(&fs));
        Self {
            root: root.into(),
            fs,
            ignores,
            tracker,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// One depth-first walk, returning changed and non-ignorable files in
    /// walk order.
    ///
    /// Ignored child directories are removed from each listing before the
    /// walk descends, so nothing beneath them is listed or fingerprinted.
    /// Every remaining file goes through the change tracker, whether or not
    /// it turns out to be ignorable.
    ///
    /// Records of files that were not listed this time are dropped, except
    /// beneath directories that could not be read.
    ///
    /// Paths are `root.join(..)` chains; with a root of `"."` they look like
    /// `"./src/main.rs"`.
    pub fn get_changed_files(&mut self) -> Result<Vec<PathBuf>> {
        let mut changed = Vec::new();
        let mut stack = vec![self.root.clone()];
        let mut seen = HashSet::new();
        let mut unreadable = Vec::new();

        while let Some(dir) = stack.pop() {
            let entries = match self.fs.read_dir(&dir) {
                Ok(entries) => entries,
                Err(err) if dir == self.root => {
                    return Err(anyhow::Error::from(err)
                        .context(format!("reading watch root {:?}", self.root))
                        .into());
                }
                Err(err) => {
                    warn!(dir = %dir.display(), error = %err, "cannot read directory; skipping subtree");
                    unreadable.push(dir);
                    continue;
                }
            };

            let (dirs, files) = self.split_entries(entries);

            for file in files {
                let file_changed = self.tracker.has_file_changed(&file.path);
                let ignorable = self.ignores.is_ignorable(&file.path);
                if file_changed && !ignorable {
                    changed.push(file.path.clone());
                }
                seen.insert(file.path);
            }

            // Reverse so the first subdirectory is walked first.
            stack.extend(dirs.into_iter().rev().map(|d| d.path));
        }

        let forgotten = self
            .tracker
            .forget_unseen(&seen, |path| unreadable.iter().any(|dir| path.starts_with(dir)));

        debug!(
            root = %self.root.display(),
            files = seen.len(),
            changed = changed.len(),
            forgotten,
            "scan complete"
        );
        Ok(changed)
    }

    /// Sort a listing by name and split it into (descendable dirs, files),
    /// dropping pruned directories.
    fn split_entries(&self, mut entries: Vec<DirEntry>) -> (Vec<DirEntry>, Vec<DirEntry>) {
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            match entry.kind {
                EntryKind::Dir if self.ignores.prunes_dir(&entry.name) => {
                    debug!(dir = %entry.path.display(), "pruned ignored directory");
                }
                EntryKind::Dir => dirs.push(entry),
                EntryKind::File => files.push(entry),
                EntryKind::Other => {}
            }
        }
        (dirs, files)
    }
}
