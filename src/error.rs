//! Pipeline Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Each variant names the stage that failed; the frames
//! underneath carry the details from that stage's crate.

use derive_more::{Display, Error};

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a pipeline failure.
///
/// ### Input Errors
/// - [`ErrorKind::Config`]
/// - [`ErrorKind::Inputs`]
///
/// ### Build Errors
/// - [`ErrorKind::Farm`]
/// - [`ErrorKind::Template`]
/// - [`ErrorKind::Stylesheet`]
/// - [`ErrorKind::Encode`]
/// - [`ErrorKind::Lookup`]
///
/// ### Output Errors
/// - [`ErrorKind::Cache`]
/// - [`ErrorKind::Publish`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Configuration could not be loaded or is inconsistent.
    #[display("configuration error")]
    Config,
    /// Vendor metadata or static tables are missing or malformed.
    #[display("could not read emoji inputs")]
    Inputs,
    #[display("could not assemble image farm for `{_0}`")]
    Farm(#[error(not(source))] String),
    #[display("could not compile stylesheet template")]
    Template,
    #[display("could not generate stylesheet for `{_0}`")]
    Stylesheet(#[error(not(source))] String),
    #[display("could not encode spritesheet for `{_0}`")]
    Encode(#[error(not(source))] String),
    #[display("could not generate lookup tables")]
    Lookup,
    #[display("cache error")]
    Cache,
    #[display("could not publish build output")]
    Publish,
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }
}
