// src/watch/ignore.rs

//! Ignore filter: which directories are pruned from the walk and which files
//! never trigger a rerun.
//!
//! Matching is deliberately simple:
//! - names are compared against the path's final component, exactly
//!   (`"h.txt"` ignores `"somedir/h.txt"` but not `"gh.txt"`);
//! - extensions are compared as plain suffixes of the whole path.

use std::path::Path;

/// Directories that are always pruned, whatever the user passes.
pub const SKIP_DIRS: &[&str] = &[
    ".svn",
    ".git",
    ".hg",
    ".bzr",
    ".cache",
    "build",
    "dist",
    "node_modules",
    "target",
    "__pycache__",
];

/// File suffixes that are always ignored.
pub const SKIP_EXT: &[&str] = &[".pyc", ".pyo", ".swp", ".swo", ".swx"];

/// Returns true if `path`'s basename equals one of `ignores`, or `path` ends
/// with one of [`SKIP_EXT`].
pub fn is_ignorable<S: AsRef<str>>(path: &Path, ignores: &[S]) -> bool {
    let basename_matches = path
        .file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            ignores.iter().any(|i| i.as_ref() == name)
        })
        .unwrap_or(false);

    basename_matches || has_skipped_extension(path)
}

fn has_skipped_extension(path: &Path) -> bool {
    let path = path.to_string_lossy();
    SKIP_EXT.iter().any(|ext| path.ends_with(ext))
}

/// The effective ignore list for one watch session.
///
/// Starts as a copy of [`SKIP_DIRS`]; user values are appended once at
/// startup and the set is read-only afterwards. The same list drives both
/// directory pruning and file ignoring, so `--ignore fixtures` skips a
/// `fixtures/` directory and any file called `fixtures`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    names: Vec<String>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self {
            names: SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IgnoreSet {
    /// Built-in defaults followed by `extra`, in order.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.names.extend(extra.into_iter().map(Into::into));
        set
    }

    /// An ignore set without the built-in directory list. Extensions in
    /// [`SKIP_EXT`] are still ignored.
    pub fn without_defaults<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Should the walk skip a child directory called `dir_name`?
    pub fn prunes_dir(&self, dir_name: &str) -> bool {
        self.names.iter().any(|n| n == dir_name)
    }

    /// Should a change to `path` be ignored?
    pub fn is_ignorable(&self, path: &Path) -> bool {
        is_ignorable(path, &self.names)
    }
}
