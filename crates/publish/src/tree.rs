//! Synchronous directory listing.

use crate::error::{ErrorKind, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Everything under a root, as paths relative to it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tree {
    pub files: BTreeSet<PathBuf>,
    pub dirs: BTreeSet<PathBuf>,
    /// Symlinks and anything else that is neither a regular file nor a
    /// directory. Listed but never followed.
    pub links: BTreeSet<PathBuf>,
}

enum WalkEntry {
    File(PathBuf),
    Descend(PathBuf),
    Link(PathBuf),
}

impl Tree {
    /// Lists everything under `root`. A root that doesn't exist lists as
    /// empty; a root that is a file is an error.
    pub fn list(root: &Path) -> Result<Self> {
        let mut tree = Self::default();
        match std::fs::metadata(root) {
            Ok(metadata) if metadata.is_dir() => {},
            Ok(_) => exn::bail!(ErrorKind::NotADirectory(root.to_path_buf())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(tree),
            Err(e) => exn::bail!(ErrorKind::from_io(e, root)),
        }
        let mut stack = vec![root.to_path_buf()];
        while let Some(current) = stack.pop() {
            let entries = std::fs::read_dir(&current).map_err(|e| ErrorKind::from_io(e, &current))?;
            for entry in entries {
                let entry = entry.map_err(|e| ErrorKind::from_io(e, &current))?;
                match Self::process_entry(root, &entry.path())? {
                    WalkEntry::File(relative) => {
                        tree.files.insert(relative);
                    },
                    WalkEntry::Descend(absolute) => {
                        tree.dirs.insert(Self::relative(root, &absolute)?);
                        stack.push(absolute);
                    },
                    WalkEntry::Link(relative) => {
                        tree.links.insert(relative);
                    },
                }
            }
        }
        tracing::trace!(
            root = %root.display(),
            files = tree.files.len(),
            dirs = tree.dirs.len(),
            links = tree.links.len(),
            "Tree listed"
        );
        Ok(tree)
    }

    fn process_entry(root: &Path, path: &Path) -> Result<WalkEntry> {
        // Don't follow links: a linked directory would be walked twice, or forever.
        let metadata = std::fs::symlink_metadata(path).map_err(|e| ErrorKind::from_io(e, path))?;
        if metadata.is_dir() {
            return Ok(WalkEntry::Descend(path.to_path_buf()));
        }
        if metadata.is_file() {
            return Ok(WalkEntry::File(Self::relative(root, path)?));
        }
        Ok(WalkEntry::Link(Self::relative(root, path)?))
    }

    fn relative(root: &Path, absolute: &Path) -> Result<PathBuf> {
        match absolute.strip_prefix(root) {
            Ok(relative) => Ok(relative.to_path_buf()),
            Err(_) => exn::bail!(ErrorKind::InvalidPath(absolute.to_path_buf())),
        }
    }
}
