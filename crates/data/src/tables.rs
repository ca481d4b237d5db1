//! Static name tables.
//!
//! These are the hand-curated inputs that sit next to the build tooling
//! rather than inside a vendor package: the picker name map, the legacy alias
//! map, emoticon conversions and the codepoint remap table. They're loaded
//! once per run into [`StaticTables`] and handed to each generation step.

use crate::error::Result;
use crate::models::EmojiCode;
use crate::read_json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Canonical name and aliases for a single codepoint in the picker map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameInfo {
    pub canonical_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}
impl NameInfo {
    /// Canonical name first, then aliases in their original order.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// File names of each table, relative to the inputs directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFiles {
    /// Codepoint to `{canonical_name, aliases}` (the picker map).
    pub names: PathBuf,
    /// Legacy name to codepoint map, many names per codepoint.
    pub legacy_map: PathBuf,
    /// Emoticon text to `:emoji_name:` text.
    pub emoticons: PathBuf,
    /// Codepoints whose "obvious" image is missing, mapped to a substitute.
    pub remaps: PathBuf,
}
impl Default for TableFiles {
    fn default() -> Self {
        Self {
            names: PathBuf::from("emoji_names.json"),
            legacy_map: PathBuf::from("emoji_map.json"),
            emoticons: PathBuf::from("emoticons.json"),
            remaps: PathBuf::from("remapped_emojis.json"),
        }
    }
}
impl TableFiles {
    /// Every table file resolved against `dir`, labelled for fingerprinting.
    pub fn resolve(&self, dir: &Path) -> [(&'static str, PathBuf); 4] {
        [
            ("names", dir.join(&self.names)),
            ("legacy_map", dir.join(&self.legacy_map)),
            ("emoticons", dir.join(&self.emoticons)),
            ("remaps", dir.join(&self.remaps)),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticTables {
    pub names: BTreeMap<EmojiCode, NameInfo>,
    pub legacy_map: BTreeMap<String, EmojiCode>,
    pub emoticons: BTreeMap<String, String>,
    pub remaps: BTreeMap<EmojiCode, EmojiCode>,
}
impl StaticTables {
    #[instrument(skip(files), fields(dir = %dir.display()))]
    pub fn load(dir: &Path, files: &TableFiles) -> Result<Self> {
        let tables = Self {
            names: read_json(&dir.join(&files.names))?,
            legacy_map: read_json(&dir.join(&files.legacy_map))?,
            emoticons: read_json(&dir.join(&files.emoticons))?,
            remaps: read_json(&dir.join(&files.remaps))?,
        };
        tracing::debug!(
            names = tables.names.len(),
            legacy = tables.legacy_map.len(),
            emoticons = tables.emoticons.len(),
            remaps = tables.remaps.len(),
            "Static emoji tables loaded"
        );
        Ok(tables)
    }

    /// Every canonical name and alias, sorted.
    pub fn picker_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.values().flat_map(NameInfo::all_names).map(String::from).collect();
        names.sort();
        names
    }

    pub fn name_to_codepoint(&self) -> BTreeMap<String, EmojiCode> {
        self.names
            .iter()
            .flat_map(|(code, info)| info.all_names().map(move |name| (name.to_string(), code.clone())))
            .collect()
    }

    pub fn codepoint_to_name(&self) -> BTreeMap<EmojiCode, String> {
        self.names.iter().map(|(code, info)| (code.clone(), info.canonical_name.clone())).collect()
    }

    pub fn codepoint_to_names(&self) -> BTreeMap<EmojiCode, Vec<String>> {
        self.names.iter().map(|(code, info)| (code.clone(), info.all_names().map(String::from).collect())).collect()
    }

    /// The codepoint whose image should stand in for `code` (itself, unless remapped).
    pub fn remap<'a>(&'a self, code: &'a EmojiCode) -> &'a EmojiCode {
        self.remaps.get(code).unwrap_or(code)
    }
}
