//! Mirror one directory tree into another, touching only what differs.
//!
//! Used for outputs that get copied into the repository rather than linked,
//! so unchanged files keep their timestamps and watchers stay quiet.

use crate::error::{ErrorKind, Result};
use crate::tree::Tree;
use std::path::{Path, PathBuf};
use tracing::instrument;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub copied: Vec<PathBuf>,
    pub unchanged: usize,
    pub removed: Vec<PathBuf>,
}
impl Reconciled {
    pub fn is_noop(&self) -> bool {
        self.copied.is_empty() && self.removed.is_empty()
    }
}

/// Makes the file set under `target` equal to the one under `source`.
#[instrument(skip_all, fields(source = %source.display(), target = %target.display()))]
pub fn reconcile(source: &Path, target: &Path) -> Result<Reconciled> {
    if !source.is_dir() {
        exn::bail!(ErrorKind::NotFound(source.to_path_buf()));
    }
    let wanted = Tree::list(source)?;
    let existing = Tree::list(target)?;
    let mut report = Reconciled::default();

    // Copying onto a link would write through it, so links go first.
    for relative in &existing.links {
        let path = target.join(relative);
        std::fs::remove_file(&path).map_err(|e| ErrorKind::from_io(e, &path))?;
        tracing::debug!(path = %relative.display(), "Removed link");
        report.removed.push(relative.clone());
    }

    for relative in &wanted.files {
        let from = source.join(relative);
        let to = target.join(relative);
        if existing.files.contains(relative) && same_contents(&from, &to)? {
            report.unchanged += 1;
            continue;
        }
        if existing.dirs.contains(relative) {
            std::fs::remove_dir_all(&to).map_err(|e| ErrorKind::from_io(e, &to))?;
        }
        for ancestor in relative.ancestors().skip(1).filter(|a| existing.files.contains(*a)) {
            let path = target.join(ancestor);
            if path.is_file() {
                std::fs::remove_file(&path).map_err(|e| ErrorKind::from_io(e, &path))?;
            }
        }
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ErrorKind::from_io(e, parent))?;
        }
        std::fs::copy(&from, &to).map_err(|e| ErrorKind::from_io(e, &to))?;
        tracing::debug!(path = %relative.display(), "Copied");
        report.copied.push(relative.clone());
    }

    // Some of these already went with a directory or file cleared above.
    for relative in existing.files.difference(&wanted.files) {
        let path = target.join(relative);
        if std::fs::symlink_metadata(&path).is_ok_and(|m| m.is_file()) {
            std::fs::remove_file(&path).map_err(|e| ErrorKind::from_io(e, &path))?;
        }
        tracing::debug!(path = %relative.display(), "Removed");
        report.removed.push(relative.clone());
    }
    report.removed.sort();

    // Deepest first, so a parent only empties once its children are gone.
    let mut dirs: Vec<_> = existing.dirs.difference(&wanted.dirs).collect();
    dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));
    for relative in dirs {
        let path = target.join(relative);
        if path.is_dir() && is_empty_dir(&path)? {
            std::fs::remove_dir(&path).map_err(|e| ErrorKind::from_io(e, &path))?;
        }
    }

    tracing::info!(
        copied = report.copied.len(),
        unchanged = report.unchanged,
        removed = report.removed.len(),
        "Tree reconciled"
    );
    Ok(report)
}

fn same_contents(a: &Path, b: &Path) -> Result<bool> {
    let len = |path: &Path| std::fs::metadata(path).map(|m| m.len()).map_err(|e| ErrorKind::from_io(e, path));
    if len(a)? != len(b)? {
        return Ok(false);
    }
    let read = |path: &Path| std::fs::read(path).map_err(|e| ErrorKind::from_io(e, path));
    Ok(read(a)? == read(b)?)
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    let mut entries = std::fs::read_dir(path).map_err(|e| ErrorKind::from_io(e, path))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn paths(list: &[PathBuf]) -> Vec<&str> {
        list.iter().map(|p| p.to_str().unwrap()).collect()
    }

    #[test]
    fn test_into_empty_target() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(source.path(), "google-sprite.css", "a");
        write(source.path(), "twitter-sprite.css", "b");
        let report = reconcile(source.path(), &target.path().join("emoji-styles")).unwrap();
        assert_eq!(paths(&report.copied), ["google-sprite.css", "twitter-sprite.css"]);
        assert_eq!(fs::read_to_string(target.path().join("emoji-styles/twitter-sprite.css")).unwrap(), "b");
    }

    #[test]
    fn test_copies_only_differences() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(source.path(), "same.css", "same");
        write(source.path(), "changed.css", "new");
        write(source.path(), "resized.css", "longer now");
        write(target.path(), "same.css", "same");
        write(target.path(), "changed.css", "old");
        write(target.path(), "resized.css", "short");
        write(target.path(), "stale.css", "gone");
        write(target.path(), "old/deeper/stale.css", "gone");

        let report = reconcile(source.path(), target.path()).unwrap();
        assert_eq!(paths(&report.copied), ["changed.css", "resized.css"]);
        assert_eq!(report.unchanged, 1);
        assert_eq!(paths(&report.removed), ["old/deeper/stale.css", "stale.css"]);
        assert!(!target.path().join("old").exists());
        assert_eq!(Tree::list(target.path()).unwrap(), Tree::list(source.path()).unwrap());
    }

    #[test]
    fn test_second_run_is_noop() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(source.path(), "nested/google-sprite.css", "a");
        reconcile(source.path(), target.path()).unwrap();
        let report = reconcile(source.path(), target.path()).unwrap();
        assert!(report.is_noop());
        assert_eq!(report.unchanged, 1);
    }

    /// `stale` sits where the source needs a file or a directory.
    #[rstest]
    #[case::directory_in_place_of_file("google-sprite.css/old/stale.css")]
    #[case::file_in_place_of_directory("nested")]
    #[case::nested_under_replaced_directory("google-sprite.css/deeper/still/stale.css")]
    fn test_replaces_conflicting_entries(#[case] stale: &str) {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(source.path(), "google-sprite.css", "a");
        write(source.path(), "nested/twitter-sprite.css", "b");
        write(target.path(), stale, "stale");

        let report = reconcile(source.path(), target.path()).unwrap();
        assert_eq!(paths(&report.copied), ["google-sprite.css", "nested/twitter-sprite.css"]);
        assert_eq!(paths(&report.removed), [stale]);
        assert_eq!(Tree::list(target.path()).unwrap(), Tree::list(source.path()).unwrap());
        assert_eq!(fs::read_to_string(target.path().join("google-sprite.css")).unwrap(), "a");
    }

    #[cfg(unix)]
    #[test]
    fn test_removes_stale_links() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        write(source.path(), "google-sprite.css", "a");
        write(elsewhere.path(), "apple-sprite.css", "outside");
        std::os::unix::fs::symlink(elsewhere.path().join("apple-sprite.css"), target.path().join("apple-sprite.css"))
            .unwrap();
        std::os::unix::fs::symlink(elsewhere.path(), target.path().join("linked-dir")).unwrap();

        let report = reconcile(source.path(), target.path()).unwrap();
        assert_eq!(paths(&report.removed), ["apple-sprite.css", "linked-dir"]);
        assert_eq!(Tree::list(target.path()).unwrap(), Tree::list(source.path()).unwrap());
        assert_eq!(fs::read_to_string(elsewhere.path().join("apple-sprite.css")).unwrap(), "outside");
    }

    #[cfg(unix)]
    #[test]
    fn test_does_not_write_through_a_link() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        write(source.path(), "google-sprite.css", "new");
        write(elsewhere.path(), "google-sprite.css", "outside");
        std::os::unix::fs::symlink(elsewhere.path().join("google-sprite.css"), target.path().join("google-sprite.css"))
            .unwrap();

        let report = reconcile(source.path(), target.path()).unwrap();
        assert_eq!(paths(&report.copied), ["google-sprite.css"]);
        assert!(!fs::symlink_metadata(target.path().join("google-sprite.css")).unwrap().is_symlink());
        assert_eq!(fs::read_to_string(target.path().join("google-sprite.css")).unwrap(), "new");
        assert_eq!(fs::read_to_string(elsewhere.path().join("google-sprite.css")).unwrap(), "outside");
    }

    #[test]
    fn test_missing_source() {
        let target = tempfile::tempdir().unwrap();
        let err = reconcile(&target.path().join("nope"), target.path()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }
}
