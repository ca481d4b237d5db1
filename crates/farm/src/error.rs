//! Farm Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A farm error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for farm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Vendor metadata flags an image that isn't in the package (or an
    /// override image is missing). The vendor package is probably incomplete.
    #[display("missing source image: {}", _0.display())]
    MissingImage(#[error(not(source))] PathBuf),
    /// A link in the legacy farm could not be created.
    #[display("could not link {}", _0.display())]
    Link(#[error(not(source))] PathBuf),
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }
}
