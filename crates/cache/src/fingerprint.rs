use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::Path;

/// Incremental BLAKE3 digest over everything a build reads.
///
/// Each input is framed by its label and length, so the same bytes split
/// differently across files still produce a different key. Feed inputs in a
/// fixed order: the digest is order-sensitive.
pub struct Fingerprint {
    hasher: blake3::Hasher,
    inputs: usize,
}
impl Fingerprint {
    /// Starts a digest keyed on the build tool's own revision, so changing the
    /// tool invalidates every existing entry.
    pub fn new(revision: impl AsRef<str>) -> Self {
        let mut fingerprint = Self { hasher: blake3::Hasher::new(), inputs: 0 };
        fingerprint.frame("revision", revision.as_ref().as_bytes());
        fingerprint
    }

    pub fn bytes(mut self, label: impl AsRef<str>, bytes: &[u8]) -> Self {
        self.frame(label.as_ref(), bytes);
        self
    }

    pub fn file(self, label: impl AsRef<str>, path: &Path) -> Result<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Err(e) => return Err(e).or_raise(|| ErrorKind::Io),
        };
        Ok(self.bytes(label, &bytes))
    }

    /// Number of inputs hashed so far, revision included.
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// Lowercase hex digest, used as the cache entry's directory name.
    pub fn finish(self) -> String {
        tracing::debug!(inputs = self.inputs, "Fingerprint computed");
        self.hasher.finalize().to_hex().to_string()
    }

    fn frame(&mut self, label: &str, bytes: &[u8]) {
        self.hasher.update(&(label.len() as u64).to_le_bytes());
        self.hasher.update(label.as_bytes());
        self.hasher.update(&(bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self.inputs += 1;
    }
}
