//! Declarative vendor table.
//!
//! Each [`EmojiSet`] row says where a vendor package lives and how its
//! directories are named; [`VendorPackage`] turns that into concrete paths
//! under `node_modules`. Vendor quirks (the blob set re-using Google's
//! directory names, which sets get backfilled) are data here, not branches
//! in the pipeline.

use crate::error::Result;
use crate::models::{Cell, EmojiRecord};
use crate::read_json;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// One emoji set to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiSet {
    /// Output key: `images-<name>-64/`, `<name>-sprite.css`, `<name>.webp`.
    pub name: String,
    /// npm package providing the images and metadata.
    pub package: String,
    /// Vendor directory inside the package, and the `has_img_<alt_name>` flag
    /// consulted. Defaults to `name`.
    #[serde(default)]
    pub alt_name: Option<String>,
    /// Fill coverage gaps from the reference set's individual images.
    #[serde(default)]
    pub backfill: bool,
}
impl EmojiSet {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self { name: name.into(), package: package.into(), alt_name: None, backfill: false }
    }

    pub fn with_alt_name(mut self, alt_name: impl Into<String>) -> Self {
        self.alt_name = Some(alt_name.into());
        self
    }

    pub fn with_backfill(mut self) -> Self {
        self.backfill = true;
        self
    }

    pub fn alt_name(&self) -> &str {
        self.alt_name.as_deref().unwrap_or(&self.name)
    }

    /// Directory name of this set's flat image farm inside a cache entry.
    pub fn farm_dir(&self) -> String {
        farm_dir(&self.name)
    }

    /// The two mainstream sets plus the legacy Google "blob" set, which is an
    /// older Google dataset and therefore uses Google's directory names.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("google", "emoji-datasource-google"),
            Self::new("twitter", "emoji-datasource-twitter").with_backfill(),
            Self::new("google-blob", "emoji-datasource-google-blob").with_alt_name("google").with_backfill(),
        ]
    }
}

/// Directory name of a set's flat image farm inside a cache entry.
pub fn farm_dir(set: &str) -> String {
    format!("images-{set}-64")
}

/// Resolved locations inside one vendor package.
#[derive(Debug, Clone)]
pub struct VendorPackage {
    root: PathBuf,
    alt_name: String,
}
impl VendorPackage {
    pub fn new(node_modules: &Path, set: &EmojiSet) -> Self {
        Self { root: node_modules.join(&set.package), alt_name: set.alt_name().to_string() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata(&self) -> PathBuf {
        self.root.join("emoji.json")
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join("package.json")
    }

    /// Directory of individual 64px images.
    pub fn images(&self) -> PathBuf {
        self.root.join("img").join(&self.alt_name).join("64")
    }

    pub fn image(&self, cell: &Cell) -> PathBuf {
        self.images().join(&cell.image)
    }

    /// The vendor's pre-assembled 64px spritesheet.
    pub fn sheet(&self) -> PathBuf {
        self.root.join("img").join(&self.alt_name).join("sheets-256").join("64.png")
    }

    #[instrument(skip(self), fields(package = %self.root.display()))]
    pub fn load_records(&self) -> Result<Vec<EmojiRecord>> {
        let records: Vec<EmojiRecord> = read_json(&self.metadata())?;
        tracing::debug!(records = records.len(), "Vendor emoji metadata loaded");
        Ok(records)
    }
}
