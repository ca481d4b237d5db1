use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Written last, after every build step succeeded.
pub const SUCCESS_STAMP: &str = ".success-stamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A complete entry already existed; nothing ran.
    Hit,
    Built,
}

/// One fingerprint-named directory under the cache root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    path: PathBuf,
}
impl CacheEntry {
    pub fn new(base: &Path, fingerprint: impl AsRef<str>) -> Self {
        Self { path: base.join(fingerprint.as_ref()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stamp(&self) -> PathBuf {
        self.path.join(SUCCESS_STAMP)
    }

    /// Only a stamped entry is complete. A directory without the stamp is
    /// left over from a failed or interrupted build.
    pub fn is_complete(&self) -> bool {
        self.stamp().is_file()
    }

    /// Runs `build` into an empty entry directory unless the entry is already
    /// complete. The stamp is written only if `build` succeeds.
    #[instrument(skip_all, fields(entry = %self.path.display()))]
    pub fn build_with<F, E>(&self, build: F) -> Result<Outcome>
    where
        F: FnOnce(&Path) -> std::result::Result<(), exn::Exn<E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        if self.is_complete() {
            tracing::info!("Cache entry is complete; skipping build");
            return Ok(Outcome::Hit);
        }
        self.clear()?;
        std::fs::create_dir_all(&self.path).or_raise(|| ErrorKind::Io)?;
        build(&self.path).or_raise(|| ErrorKind::Build)?;
        std::fs::write(self.stamp(), b"").or_raise(|| ErrorKind::Io)?;
        tracing::info!("Cache entry built");
        Ok(Outcome::Built)
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {
                tracing::warn!("Removed incomplete cache entry from an earlier run");
                Ok(())
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).or_raise(|| ErrorKind::Io),
        }
    }
}
