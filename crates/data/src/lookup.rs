//! JSON lookup documents.
//!
//! [`EmojiCodes`] is the comprehensive document consumed by the app itself.
//! [`EmojiApi`] is the narrower contract offered to external consumers; it
//! stays stable while the former changes shape.

use crate::catalog::Catalog;
use crate::error::{ErrorKind, Result};
use crate::models::EmojiCode;
use crate::tables::StaticTables;
use exn::ResultExt;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const EMOJI_CODES_FILE: &str = "emoji_codes.json";
pub const EMOJI_API_FILE: &str = "emoji_api.json";

#[derive(Debug, Serialize)]
pub struct EmojiCodes<'a> {
    pub names: Vec<String>,
    pub name_to_codepoint: BTreeMap<String, EmojiCode>,
    pub codepoint_to_name: BTreeMap<EmojiCode, String>,
    pub emoji_catalog: &'a Catalog,
    pub emoticon_conversions: &'a BTreeMap<String, String>,
}
impl<'a> EmojiCodes<'a> {
    pub fn new(tables: &'a StaticTables, catalog: &'a Catalog) -> Self {
        Self {
            names: tables.picker_names(),
            name_to_codepoint: tables.name_to_codepoint(),
            codepoint_to_name: tables.codepoint_to_name(),
            emoji_catalog: catalog,
            emoticon_conversions: &tables.emoticons,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmojiApi {
    pub codepoint_to_names: BTreeMap<EmojiCode, Vec<String>>,
}
impl EmojiApi {
    pub fn new(tables: &StaticTables) -> Self {
        Self { codepoint_to_names: tables.codepoint_to_names() }
    }
}

/// Serializes `document` as compact JSON to `path`.
pub fn write(path: &Path, document: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec(document).or_raise(|| ErrorKind::Serialize)?;
    std::fs::write(path, bytes).or_raise(|| ErrorKind::Io)?;
    tracing::debug!(path = %path.display(), "Lookup document written");
    Ok(())
}
