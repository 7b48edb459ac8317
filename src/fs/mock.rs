// src/fs/mock.rs

use super::{DirEntry, EntryKind, FileSystem};
use crate::types::Fingerprint;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Fingerprint),
    Dir(Vec<String>), // List of child names
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    stat_errors: HashMap<PathBuf, io::ErrorKind>,
    read_dir_errors: HashMap<PathBuf, io::ErrorKind>,
    read_dir_calls: HashMap<PathBuf, usize>,
    stat_calls: HashMap<PathBuf, usize>,
    clock: u64,
}

/// In-memory tree rooted at `"."`.
///
/// Relative paths are stored the way a walk from `"."` produces them
/// (`"./src/main.rs"`), so `add_file("src/main.rs", ..)` and
/// `add_file("./src/main.rs", ..)` name the same file. Every `read_dir` and
/// `stat` call is counted per path, which lets tests assert what the walk
/// actually touched.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut state = MockState::default();
        // Ensure root exists
        state
            .entries
            .insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Add (or overwrite) a file with the given size and a fresh mtime.
    pub fn add_file(&self, path: impl AsRef<Path>, size: u64) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        let modified = tick(&mut state);
        state
            .entries
            .insert(path.clone(), MockEntry::File(Fingerprint::new(size, Some(modified))));
        link_into_parent(&mut state, &path);
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        ensure_dir_entry(&mut state, &path);
    }

    /// Bump a file's mtime, keeping its size.
    pub fn touch(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        let modified = tick(&mut state);
        if let Some(MockEntry::File(fp)) = state.entries.get_mut(&path) {
            fp.modified = Some(modified);
        }
    }

    /// Change a file's size, keeping its mtime.
    pub fn set_size(&self, path: impl AsRef<Path>, size: u64) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        if let Some(MockEntry::File(fp)) = state.entries.get_mut(&path) {
            fp.size = size;
        }
    }

    /// Remove a file from the tree and from its parent's listing.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        state.entries.remove(&path);
        if let (Some(parent), Some(name)) = (parent_of(&path), path.file_name()) {
            let name = name.to_string_lossy().into_owned();
            if let Some(MockEntry::Dir(children)) = state.entries.get_mut(&parent) {
                children.retain(|c| *c != name);
            }
        }
    }

    /// Remove a file but leave it in its parent's listing, as if it was
    /// deleted between the directory read and the stat.
    pub fn vanish(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        state.entries.remove(&path);
    }

    /// Make every subsequent `stat` of `path` fail with `kind`.
    pub fn fail_stat(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        state.stat_errors.insert(path, kind);
    }

    /// Make every subsequent `read_dir` of `path` fail with `kind`.
    pub fn fail_read_dir(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        state.read_dir_errors.insert(path, kind);
    }

    /// Undo `fail_stat`.
    pub fn clear_stat_failure(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut state = self.state.lock().unwrap();
        state.stat_errors.remove(&path);
    }

    pub fn read_dir_calls(&self, path: impl AsRef<Path>) -> usize {
        let path = normalize(path.as_ref());
        let state = self.state.lock().unwrap();
        state.read_dir_calls.get(&path).copied().unwrap_or(0)
    }

    pub fn stat_calls(&self, path: impl AsRef<Path>) -> usize {
        let path = normalize(path.as_ref());
        let state = self.state.lock().unwrap();
        state.stat_calls.get(&path).copied().unwrap_or(0)
    }

    pub fn total_stat_calls(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.stat_calls.values().sum()
    }

    /// Every path `read_dir` was called on, in no particular order.
    pub fn visited_dirs(&self) -> Vec<PathBuf> {
        let state = self.state.lock().unwrap();
        state.read_dir_calls.keys().cloned().collect()
    }
}

fn normalize(path: &Path) -> PathBuf {
    match path.components().next() {
        None => PathBuf::from("."),
        Some(Component::CurDir) => path.to_path_buf(),
        Some(Component::Normal(_)) => Path::new(".").join(path),
        Some(_) => path.to_path_buf(),
    }
}

fn parent_of(path: &Path) -> Option<PathBuf> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Some(PathBuf::from(".")),
        Some(parent) => Some(parent.to_path_buf()),
        None => None,
    }
}

fn tick(state: &mut MockState) -> SystemTime {
    state.clock += 1;
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000 + state.clock)
}

fn link_into_parent(state: &mut MockState, path: &Path) {
    let Some(parent) = parent_of(path) else {
        return;
    };
    if parent == path {
        return;
    }
    ensure_dir_entry(state, &parent);
    if let (Some(MockEntry::Dir(children)), Some(name)) =
        (state.entries.get_mut(&parent), path.file_name())
    {
        let name = name.to_string_lossy().into_owned();
        if !children.contains(&name) {
            children.push(name);
        }
    }
}

fn ensure_dir_entry(state: &mut MockState, path: &Path) {
    if state.entries.contains_key(path) {
        return;
    }
    state
        .entries
        .insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
    // Avoid infinite loop at root
    if path != Path::new(".") {
        link_into_parent(state, path);
    }
}

impl FileSystem for MockFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut state = self.state.lock().unwrap();
        *state.read_dir_calls.entry(path.to_path_buf()).or_insert(0) += 1;

        if let Some(kind) = state.read_dir_errors.get(path) {
            return Err(io::Error::new(*kind, format!("read_dir failed: {:?}", path)));
        }

        let children = match state.entries.get(path) {
            Some(MockEntry::Dir(children)) => children.clone(),
            Some(MockEntry::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Not a directory: {:?}", path),
                ));
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Directory not found: {:?}", path),
                ));
            }
        };

        Ok(children
            .into_iter()
            .map(|name| {
                let child = path.join(&name);
                let kind = match state.entries.get(&child) {
                    Some(MockEntry::Dir(_)) => EntryKind::Dir,
                    _ => EntryKind::File,
                };
                DirEntry {
                    path: child,
                    name,
                    kind,
                }
            })
            .collect())
    }

    fn stat(&self, path: &Path) -> io::Result<Fingerprint> {
        let mut state = self.state.lock().unwrap();
        *state.stat_calls.entry(path.to_path_buf()).or_insert(0) += 1;

        if let Some(kind) = state.stat_errors.get(path) {
            return Err(io::Error::new(*kind, format!("stat failed: {:?}", path)));
        }

        match state.entries.get(path) {
            Some(MockEntry::File(fp)) => Ok(*fp),
            Some(MockEntry::Dir(_)) => Ok(Fingerprint::new(0, None)),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {:?}", path),
            )),
        }
    }
}
