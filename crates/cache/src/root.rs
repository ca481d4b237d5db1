use crate::entry::CacheEntry;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// The shared directory holding every cache entry.
///
/// It usually lives outside the repository (e.g. `/srv/emoji-cache`) so that
/// several checkouts share built entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot {
    base: PathBuf,
    /// Escalate with `sudo` when the base directory can't be created.
    provision: bool,
}
impl CacheRoot {
    pub fn new(base: impl Into<PathBuf>, provision: bool) -> Self {
        Self { base: base.into(), provision }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn entry(&self, fingerprint: impl AsRef<str>) -> CacheEntry {
        CacheEntry::new(&self.base, fingerprint)
    }

    /// Makes sure the base directory exists. When creating it is denied and
    /// provisioning is enabled, it is created with `sudo` and handed over to
    /// whoever owns `owner` (the repository root).
    #[instrument(skip(self), fields(base = %self.base.display()))]
    pub fn ensure(&self, owner: &Path) -> Result<()> {
        if self.base.is_dir() {
            return Ok(());
        }
        match std::fs::create_dir_all(&self.base) {
            Ok(()) => {
                tracing::info!("Cache directory created");
                Ok(())
            },
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied && self.provision => {
                tracing::warn!("Permission denied creating cache directory; provisioning with sudo");
                self.provision_with_sudo(owner)
            },
            Err(e) => Err(e).or_raise(|| ErrorKind::Provision(self.base.clone())),
        }
    }

    #[cfg(unix)]
    fn provision_with_sudo(&self, owner: &Path) -> Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::fs::MetadataExt;
        use std::process::Command;

        let sudo = which::which("sudo").or_raise(|| ErrorKind::SudoNotFound)?;
        let metadata = std::fs::metadata(owner).or_raise(|| ErrorKind::Io)?;
        let ownership = format!("{}:{}", metadata.uid(), metadata.gid());
        let base = self.base.as_os_str();
        let steps = [
            vec![OsStr::new("mkdir"), OsStr::new("-p"), base],
            vec![OsStr::new("chown"), OsStr::new(&ownership), base],
        ];
        for args in steps {
            let status = Command::new(&sudo).args(&args).status().or_raise(|| ErrorKind::Io)?;
            if !status.success() {
                tracing::error!(step = ?args[0], code = ?status.code(), "sudo provisioning step failed");
                exn::bail!(ErrorKind::Provision(self.base.clone()));
            }
        }
        tracing::info!(owner = %ownership, "Cache directory provisioned");
        Ok(())
    }

    #[cfg(not(unix))]
    fn provision_with_sudo(&self, _owner: &Path) -> Result<()> {
        exn::bail!(ErrorKind::Provision(self.base.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_base() {
        let dir = tempfile::tempdir().unwrap();
        let root = CacheRoot::new(dir.path().join("nested/emoji-cache"), false);
        root.ensure(dir.path()).unwrap();
        assert!(root.base().is_dir());
        // Idempotent.
        root.ensure(dir.path()).unwrap();
    }

    #[test]
    fn test_entries_live_under_base() {
        let root = CacheRoot::new("/srv/emoji-cache", true);
        assert_eq!(root.entry("abc123").path(), Path::new("/srv/emoji-cache/abc123"));
    }

    #[test]
    fn test_base_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();
        let root = CacheRoot::new(blocker.join("emoji-cache"), true);
        let err = root.ensure(dir.path()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Provision(_)));
    }
}
