use super::EmojiCode;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// The part of a vendor entry that occupies a spritesheet cell: codepoint,
/// image file name, grid coordinates and per-vendor image availability.
///
/// Shared by top-level records and their skin-tone variations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "raw::Cell")]
pub struct Cell {
    pub unified: String,
    pub non_qualified: Option<String>,
    /// Image file name inside the vendor's `img/<alt>/64/` directory.
    pub image: String,
    /// Column in the spritesheet grid.
    pub sheet_x: u32,
    /// Row in the spritesheet grid.
    pub sheet_y: u32,
    /// Vendors that ship an image for this cell (from `has_img_<vendor>`).
    images: BTreeSet<String>,
}
impl Cell {
    /// Canonical emoji code: the non-qualified codepoint when present,
    /// otherwise the unified codepoint.
    pub fn code(&self) -> EmojiCode {
        EmojiCode::new(self.non_qualified.as_deref().unwrap_or(&self.unified))
    }

    pub fn has_image(&self, vendor: impl AsRef<str>) -> bool {
        self.images.contains(vendor.as_ref())
    }

    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(String::as_str)
    }
}

/// One entry from a vendor's `emoji.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "raw::Record")]
pub struct EmojiRecord {
    pub cell: Cell,
    pub category: Option<String>,
    pub sort_order: Option<u32>,
    /// Skin-tone variations, keyed by the vendor's skin-tone identifier.
    pub skin_variations: BTreeMap<String, Cell>,
}
impl EmojiRecord {
    pub fn code(&self) -> EmojiCode {
        self.cell.code()
    }

    /// The record's own cell followed by every skin-tone variation.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        std::iter::once(&self.cell).chain(self.skin_variations.values())
    }
}

/// Wire shapes. Everything we don't name is kept in `rest` just long enough
/// to pick out the `has_img_*` flags.
mod raw {
    use serde::Deserialize;
    use serde_json::Value;
    use std::collections::BTreeMap;

    const IMAGE_FLAG_PREFIX: &str = "has_img_";

    #[derive(Deserialize)]
    pub(super) struct Cell {
        unified: String,
        #[serde(default)]
        non_qualified: Option<String>,
        image: String,
        sheet_x: u32,
        sheet_y: u32,
        #[serde(flatten)]
        rest: BTreeMap<String, Value>,
    }

    #[derive(Deserialize)]
    pub(super) struct Record {
        #[serde(flatten)]
        cell: Cell,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        sort_order: Option<u32>,
        #[serde(default)]
        skin_variations: BTreeMap<String, Cell>,
    }

    impl From<Cell> for super::Cell {
        fn from(raw: Cell) -> Self {
            let images = raw
                .rest
                .iter()
                .filter(|(_, flag)| flag.as_bool().unwrap_or(false))
                .filter_map(|(key, _)| key.strip_prefix(IMAGE_FLAG_PREFIX).map(String::from))
                .collect();
            Self {
                unified: raw.unified,
                non_qualified: raw.non_qualified,
                image: raw.image,
                sheet_x: raw.sheet_x,
                sheet_y: raw.sheet_y,
                images,
            }
        }
    }

    impl From<Record> for super::EmojiRecord {
        fn from(raw: Record) -> Self {
            Self {
                cell: raw.cell.into(),
                category: raw.category,
                sort_order: raw.sort_order,
                skin_variations: raw.skin_variations.into_iter().map(|(k, v)| (k, v.into())).collect(),
            }
        }
    }
}
