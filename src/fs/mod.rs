// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::types::Fingerprint;

pub mod mock;

/// What kind of thing a directory entry is, as far as the walk cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Descend into it.
    Dir,
    /// Fingerprint it.
    File,
    /// Neither (e.g. a symlink pointing at a directory).
    Other,
}

/// One child of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Parent path joined with the entry's raw file name.
    pub path: PathBuf,
    /// Lossy UTF-8 file name, for ignore matching and sorting only.
    pub name: String,
    pub kind: EntryKind,
}

/// Abstract filesystem interface.
///
/// Both methods return raw `io::Error`s so callers can tell a vanished file
/// (`NotFound`) apart from everything else.
pub trait FileSystem: Send + Sync + Debug {
    /// Return the entries of a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Fingerprint a path without following a trailing symlink.
    fn stat(&self, path: &Path) -> io::Result<Fingerprint>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type()?;
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_symlink() {
                // Links to directories are not followed.
                match fs::metadata(entry.path()) {
                    Ok(target) if target.is_dir() => EntryKind::Other,
                    _ => EntryKind::File,
                }
            } else {
                EntryKind::File
            };
            // `name` is lossy; the path must keep the raw OS bytes.
            entries.push(DirEntry {
                path: entry.path(),
                name,
                kind,
            });
        }
        Ok(entries)
    }

    fn stat(&self, path: &Path) -> io::Result<Fingerprint> {
        let meta = fs::symlink_metadata(path)?;
        Ok(Fingerprint::new(meta.len(), meta.modified().ok()))
    }
}
