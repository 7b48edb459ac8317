// tests/tree_scanner.rs

use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::tempdir;

use rerun::fs::mock::MockFileSystem;
use rerun::fs::{FileSystem, RealFileSystem};
use rerun::watch::{IgnoreSet, TreeScanner};
use rerun_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn scanner_over(fs: &MockFileSystem, extra_ignores: &[&str]) -> TreeScanner {
    let handle: Arc<dyn FileSystem> = Arc::new(fs.clone());
    TreeScanner::new(".", handle, IgnoreSet::with_extra(extra_ignores.iter().copied()))
}

fn paths(list: &[&str]) -> Vec<PathBuf> {
    list.iter().map(PathBuf::from).collect()
}

#[test]
fn first_scan_reports_every_file() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", 1);
    fs.add_file("b.txt", 2);
    fs.add_file("src/c.rs", 3);

    let mut scanner = scanner_over(&fs, &[]);
    let changed = scanner.get_changed_files()?;

    assert_eq!(changed, paths(&["./a.txt", "./b.txt", "./src/c.rs"]));
    Ok(())
}

#[test]
fn second_scan_without_changes_is_empty() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", 1);
    fs.add_file("src/c.rs", 3);

    let mut scanner = scanner_over(&fs, &[]);
    scanner.get_changed_files()?;
    assert!(scanner.get_changed_files()?.is_empty());
    Ok(())
}

#[test]
fn walk_is_depth_first_in_name_order() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    // Insertion order deliberately scrambled.
    fs.add_file("z.txt", 1);
    fs.add_file("b/inner/deep.txt", 1);
    fs.add_file("a/one.txt", 1);
    fs.add_file("b/two.txt", 1);
    fs.add_file("m.txt", 1);

    let mut scanner = scanner_over(&fs, &[]);
    let changed = scanner.get_changed_files()?;

    assert_eq!(
        changed,
        paths(&[
            "./m.txt",
            "./z.txt",
            "./a/one.txt",
            "./b/two.txt",
            "./b/inner/deep.txt",
        ])
    );
    Ok(())
}

#[test]
fn every_file_is_stat_ed_even_after_an_early_change() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    for name in ["f", "i", "l", "e", "s"] {
        fs.add_file(name, 1);
    }

    let mut scanner = scanner_over(&fs, &[]);
    scanner.get_changed_files()?;
    assert_eq!(fs.total_stat_calls(), 5);

    // First and last file change; all five must still be visited.
    fs.touch("e");
    fs.touch("s");
    let changed = scanner.get_changed_files()?;
    assert_eq!(changed, paths(&["./e", "./s"]));
    assert_eq!(fs.total_stat_calls(), 10);
    for name in ["f", "i", "l", "e", "s"] {
        assert_eq!(fs.stat_calls(name), 2, "{name} should be stat-ed once per scan");
    }
    Ok(())
}

#[test]
fn ignored_files_are_still_fingerprinted() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("keep.txt", 1);
    fs.add_file("skip.txt", 1);
    fs.add_file("mod.pyc", 1);

    let mut scanner = scanner_over(&fs, &["skip.txt"]);
    let changed = scanner.get_changed_files()?;

    assert_eq!(changed, paths(&["./keep.txt"]));
    assert_eq!(fs.stat_calls("skip.txt"), 1);
    assert_eq!(fs.stat_calls("mod.pyc"), 1);
    assert_eq!(scanner.tracker().len(), 3);
    Ok(())
}

#[test]
fn ignored_directories_are_never_descended() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("src/main.rs", 1);
    fs.add_file(".git/HEAD", 1);
    fs.add_file(".git/objects/ab/cdef", 1);
    fs.add_file("node_modules/pkg/index.js", 1);
    fs.add_file("fixtures/big.json", 1);
    fs.add_file("src/fixtures/nested.json", 1);

    let mut scanner = scanner_over(&fs, &["fixtures"]);
    let changed = scanner.get_changed_files()?;

    assert_eq!(changed, paths(&["./src/main.rs"]));

    for pruned in [".git", ".git/objects", "node_modules", "fixtures", "src/fixtures"] {
        assert_eq!(fs.read_dir_calls(pruned), 0, "{pruned} must not be listed");
    }
    for pruned_file in [".git/HEAD", "node_modules/pkg/index.js", "fixtures/big.json"] {
        assert_eq!(fs.stat_calls(pruned_file), 0, "{pruned_file} must not be stat-ed");
    }

    let visited: HashSet<PathBuf> = fs.visited_dirs().into_iter().collect();
    assert_eq!(visited, paths(&[".", "./src"]).into_iter().collect());
    Ok(())
}

#[test]
fn only_the_modified_file_is_reported_after_priming() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", 1);
    fs.add_file("b.pyc", 1);
    fs.add_file("c.txt", 1);
    fs.add_file("d.txt", 1);

    let mut scanner = scanner_over(&fs, &["c.txt"]);
    let primed = scanner.get_changed_files()?;
    assert_eq!(primed, paths(&["./a.txt", "./d.txt"]));
    assert_eq!(scanner.tracker().len(), 4);

    fs.touch("d.txt");
    assert_eq!(scanner.get_changed_files()?, paths(&["./d.txt"]));

    // Touching ignored files never shows up.
    fs.touch("b.pyc");
    fs.touch("c.txt");
    assert!(scanner.get_changed_files()?.is_empty());
    Ok(())
}

#[test]
fn deleted_file_is_reported_once_then_forgotten() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", 1);
    fs.add_file("b.txt", 1);

    let mut scanner = scanner_over(&fs, &[]);
    scanner.get_changed_files()?;

    // Deleted between listing and stat.
    fs.vanish("b.txt");
    assert_eq!(scanner.get_changed_files()?, paths(&["./b.txt"]));
    assert_eq!(scanner.tracker().len(), 1);

    // Gone from the listing too: nothing left to report.
    fs.remove("b.txt");
    assert!(scanner.get_changed_files()?.is_empty());
    Ok(())
}

#[test]
fn permission_error_skips_file_and_scan_continues() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", 1);
    fs.add_file("locked.txt", 1);
    fs.add_file("z.txt", 1);
    fs.fail_stat("locked.txt", io::ErrorKind::PermissionDenied);

    let mut scanner = scanner_over(&fs, &[]);
    let changed = scanner.get_changed_files()?;

    assert_eq!(changed, paths(&["./a.txt", "./z.txt"]));
    Ok(())
}

#[test]
fn unreadable_subdirectory_is_skipped() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", 1);
    fs.add_file("private/secret.txt", 1);
    fs.add_file("public/readme.txt", 1);
    fs.fail_read_dir("private", io::ErrorKind::PermissionDenied);

    let mut scanner = scanner_over(&fs, &[]);
    let changed = scanner.get_changed_files()?;

    assert_eq!(changed, paths(&["./a.txt", "./public/readme.txt"]));
    assert_eq!(fs.read_dir_calls("private"), 1);
    assert_eq!(fs.stat_calls("private/secret.txt"), 0);
    Ok(())
}

#[test]
fn unreadable_root_is_an_error() {
    init_tracing();
    let fs: Arc<dyn FileSystem> = Arc::new(MockFileSystem::new());
    let mut scanner = TreeScanner::new("./missing", fs, IgnoreSet::default());
    assert!(scanner.get_changed_files().is_err());
}

#[test]
fn real_filesystem_scan_detects_edits_and_prunes() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let root = dir.path();
    fs::create_dir_all(root.join("src"))?;
    fs::create_dir_all(root.join(".git"))?;
    fs::write(root.join("src/lib.rs"), "pub fn a() {}")?;
    fs::write(root.join("notes.txt"), "hi")?;
    fs::write(root.join(".git/HEAD"), "ref")?;
    fs::write(root.join("cache.pyc"), "x")?;

    let handle: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let mut scanner = TreeScanner::new(root, handle, IgnoreSet::default());

    let first = scanner.get_changed_files()?;
    assert_eq!(first, vec![root.join("notes.txt"), root.join("src").join("lib.rs")]);
    assert!(scanner.get_changed_files()?.is_empty());

    // Size change is enough even if the mtime granularity hides the edit.
    fs::write(root.join("notes.txt"), "hello there")?;
    assert_eq!(scanner.get_changed_files()?, vec![root.join("notes.txt")]);

    fs::remove_file(root.join("src/lib.rs"))?;
    assert!(scanner.get_changed_files()?.is_empty());
    Ok(())
}

#[test]
fn records_of_files_gone_from_the_listing_are_dropped() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("keep.txt", 1);
    fs.add_file("tmp/scratch.txt", 1);

    let mut scanner = scanner_over(&fs, &[]);
    scanner.get_changed_files()?;
    assert_eq!(scanner.tracker().len(), 2);

    fs.remove("tmp/scratch.txt");
    assert!(scanner.get_changed_files()?.is_empty());
    assert_eq!(scanner.tracker().len(), 1);
    assert!(scanner.tracker().fingerprint(Path::new("./tmp/scratch.txt")).is_none());

    // Coming back is a fresh file.
    fs.add_file("tmp/scratch.txt", 1);
    assert_eq!(scanner.get_changed_files()?, paths(&["./tmp/scratch.txt"]));
    Ok(())
}

#[test]
fn records_under_an_unreadable_directory_are_kept() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.txt", 1);
    fs.add_file("private/secret.txt", 1);

    let mut scanner = scanner_over(&fs, &[]);
    scanner.get_changed_files()?;
    assert_eq!(scanner.tracker().len(), 2);

    fs.fail_read_dir("private", io::ErrorKind::PermissionDenied);
    assert!(scanner.get_changed_files()?.is_empty());
    assert_eq!(scanner.tracker().len(), 2);
    assert!(scanner.tracker().fingerprint(Path::new("./private/secret.txt")).is_some());
    Ok(())
}

#[cfg(unix)]
#[test]
fn non_utf8_file_names_are_stable_across_scans() -> TestResult {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    init_tracing();
    let dir = tempdir()?;
    let root = dir.path();
    let odd_dir = root.join(OsStr::from_bytes(b"d\xfeir"));
    fs::create_dir(&odd_dir)?;
    let odd_file = root.join(OsStr::from_bytes(b"bad\xff.txt"));
    fs::write(&odd_file, "x")?;
    let nested = odd_dir.join("inner.txt");
    fs::write(&nested, "y")?;

    let handle: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let mut scanner = TreeScanner::new(root, handle, IgnoreSet::default());

    let first = scanner.get_changed_files()?;
    assert_eq!(first.len(), 2);
    assert!(first.contains(&odd_file));
    assert!(first.contains(&nested));

    assert!(scanner.get_changed_files()?.is_empty());
    assert!(scanner.get_changed_files()?.is_empty());

    fs::write(&odd_file, "longer")?;
    assert_eq!(scanner.get_changed_files()?, vec![odd_file]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_not_followed() -> TestResult {
    use std::os::unix::fs::symlink;

    init_tracing();
    let outside = tempdir()?;
    fs::write(outside.path().join("hidden.txt"), "x")?;

    let dir = tempdir()?;
    let root = dir.path();
    fs::write(root.join("plain.txt"), "p")?;
    symlink(outside.path(), root.join("linked"))?;

    let handle: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let mut scanner = TreeScanner::new(root, handle, IgnoreSet::default());

    assert_eq!(scanner.get_changed_files()?, vec![root.join("plain.txt")]);
    assert_eq!(scanner.tracker().len(), 1);
    assert!(scanner.tracker().fingerprint(&root.join("linked")).is_none());

    fs::write(outside.path().join("hidden.txt"), "changed")?;
    assert!(scanner.get_changed_files()?.is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn symlinked_file_is_tracked_as_the_link_itself() -> TestResult {
    use std::os::unix::fs::symlink;

    init_tracing();
    let outside = tempdir()?;
    let target = outside.path().join("target.txt");
    fs::write(&target, "x")?;

    let dir = tempdir()?;
    let root = dir.path();
    let link = root.join("link.txt");
    symlink(&target, &link)?;

    let handle: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let mut scanner = TreeScanner::new(root, handle, IgnoreSet::default());

    assert_eq!(scanner.get_changed_files()?, vec![link.clone()]);
    assert!(scanner.get_changed_files()?.is_empty());

    // lstat: editing the target leaves the link's own fingerprint alone.
    fs::write(&target, "a much longer body")?;
    assert!(scanner.get_changed_files()?.is_empty());
    assert_eq!(scanner.tracker().len(), 1);
    Ok(())
}
