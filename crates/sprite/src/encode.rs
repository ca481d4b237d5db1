//! Spritesheet encoding.
//!
//! Vendors ship sheets as PNG; we publish them as lossless WebP. The actual
//! conversion is delegated to an external image tool behind [`SheetEncoder`].

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::instrument;

/// Re-encodes a vendor spritesheet at `source` into `target`.
pub trait SheetEncoder {
    fn encode(&self, source: &Path, target: &Path) -> Result<()>;
}

/// File name of a set's encoded sheet inside a cache entry.
pub fn sheet_file(set: &str) -> String {
    format!("{set}.webp")
}

/// libvips' command-line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vips {
    program: String,
}
impl Vips {
    /// Output options appended to the target path, in vips' `file[options]` syntax.
    pub const WEBP_OPTIONS: &'static str = "[lossless,Q=100,effort=6]";

    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn discover(&self) -> Result<PathBuf> {
        which::which(&self.program).or_raise(|| ErrorKind::EncoderNotFound(self.program.clone()))
    }

    fn target_argument(target: &Path) -> String {
        format!("{}{}", target.display(), Self::WEBP_OPTIONS)
    }
}
impl Default for Vips {
    fn default() -> Self {
        Self::new("vips")
    }
}
impl SheetEncoder for Vips {
    #[instrument(skip(self), fields(source = %source.display(), target = %target.display()))]
    fn encode(&self, source: &Path, target: &Path) -> Result<()> {
        if !source.is_file() {
            exn::bail!(ErrorKind::SheetNotFound(source.to_path_buf()));
        }
        let program = self.discover()?;
        tracing::trace!(program = %program.display(), "Image encoder discovered");
        let output = Command::new(&program)
            .arg("copy")
            .arg(source)
            .arg(Self::target_argument(target))
            .output()
            .or_raise(|| ErrorKind::Io)?;
        if !output.status.success() {
            tracing::error!(stderr = %String::from_utf8_lossy(&output.stderr).trim(), "Image encoder failed");
            exn::bail!(ErrorKind::EncoderFailed(output.status.code().unwrap_or(-1)));
        }
        tracing::debug!("Spritesheet encoded");
        Ok(())
    }
}
