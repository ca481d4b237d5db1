//! Hand-placed images injected into every farm, regardless of vendor data.

use crate::models::EmojiCode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The product's own emoji, available in every set under `<name>.png`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomImage {
    pub name: String,
    pub source: PathBuf,
}

/// An emoji whose vendor image is replaced by a pinned legacy image, and
/// which is rendered from that file rather than from the sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedImage {
    pub code: EmojiCode,
    pub source: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overrides {
    pub custom: CustomImage,
    pub pinned: PinnedImage,
}
impl Default for Overrides {
    fn default() -> Self {
        Self {
            custom: CustomImage { name: "zulip".to_string(), source: PathBuf::from("static/images/zulip-emoji/zulip.png") },
            // The old "cute octopus" from Google's earlier artwork.
            pinned: PinnedImage { code: EmojiCode::new("1f419"), source: PathBuf::from("tools/setup/emoji/1f419.png") },
        }
    }
}
impl Overrides {
    /// Same overrides with every source path passed through `resolve`.
    pub fn resolved(&self, resolve: impl Fn(&PathBuf) -> PathBuf) -> Self {
        Self {
            custom: CustomImage { name: self.custom.name.clone(), source: resolve(&self.custom.source) },
            pinned: PinnedImage { code: self.pinned.code.clone(), source: resolve(&self.pinned.source) },
        }
    }
}
