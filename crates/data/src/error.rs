//! Data Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, following the same layout as every other `moji` crate.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A data error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for data operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// An input file (vendor metadata or static table) is missing.
    #[display("input not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// An input file exists but isn't the JSON shape we expect.
    #[display("invalid input data: {}", _0.display())]
    InvalidData(#[error(not(source))] PathBuf),
    /// A codepoint in the curated picker map has no image in the reference set.
    #[display("emoji {_0} is named in the picker map but not supported")]
    UnsupportedEmoji(#[error(not(source))] String),
    /// A lookup document could not be serialized.
    #[display("could not serialize lookup document")]
    Serialize,
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }
}
