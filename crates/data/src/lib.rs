//! Emoji input data.
//!
//! Everything the build reads but doesn't produce: vendor `emoji.json`
//! metadata ([`models`], [`vendor`]), the hand-curated name tables
//! ([`tables`]), the hand-placed [`overrides`] and the "supported" rule
//! ([`support`]). Also the two things derived purely from them: the picker
//! [`catalog`] and the JSON [`lookup`] documents.

pub mod catalog;
pub mod error;
pub mod lookup;
pub mod models;
pub mod overrides;
pub mod support;
pub mod tables;
pub mod vendor;

pub use crate::models::{Cell, EmojiCode, EmojiRecord};
pub use crate::overrides::{CustomImage, Overrides, PinnedImage};
pub use crate::support::{HasImageIn, SupportPredicate};
pub use crate::tables::{NameInfo, StaticTables, TableFiles};
pub use crate::vendor::{EmojiSet, VendorPackage};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::de::DeserializeOwned;
use std::path::Path;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
        Err(e) => return Err(e).or_raise(|| ErrorKind::Io),
    };
    serde_json::from_slice(&bytes).or_raise(|| ErrorKind::InvalidData(path.to_path_buf()))
}
