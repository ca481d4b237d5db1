//! Sprite Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A sprite error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for sprite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The stylesheet template failed to compile or render.
    #[display("stylesheet template error")]
    Template,
    /// Embedded asset missing from the binary.
    #[display("asset not found: {_0}")]
    AssetNotFound(#[error(not(source))] String),
    #[display("image encoder `{_0}` not found on PATH")]
    EncoderNotFound(#[error(not(source))] String),
    #[display("vendor spritesheet not found: {}", _0.display())]
    SheetNotFound(#[error(not(source))] PathBuf),
    /// The encoder exited with a non-zero exit code.
    /// Killed by signal reports `-1`.
    #[display("image encoder exited with code: {_0}")]
    EncoderFailed(#[error(not(source))] i32),
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }
}
