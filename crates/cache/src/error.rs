//! Cache Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A fingerprint input is missing; the build can't be keyed.
    #[display("fingerprint input not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The cache base directory doesn't exist and couldn't be created.
    #[display("could not provision cache directory: {}", _0.display())]
    Provision(#[error(not(source))] PathBuf),
    #[display("sudo not found on PATH")]
    SudoNotFound,
    /// The build step run inside the gate failed; no marker was written.
    #[display("cache entry build failed")]
    Build,
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }
}
