//! Configuration loading and validation.
//!
//! Providers are layered with [figment], later layers overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. `moji.toml` in the platform configuration directory.
//! 3. An explicit file (TOML, YAML or JSON by extension), usually `--config`.
//! 4. `MOJI_*` environment variables, nested keys separated by `__`
//!    (e.g. `MOJI_CACHE__BASE=/tmp/emoji-cache`).
//!
//! Relative paths are resolved against [`Config::root`] with [`Config::resolve`].

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use moji_data::{EmojiSet, Overrides, TableFiles};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "MOJI_";
pub const CONFIG_FILE: &str = "moji.toml";

/// Where the hand-curated tables live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inputs {
    pub dir: PathBuf,
    #[serde(flatten)]
    pub tables: TableFiles,
}
impl Default for Inputs {
    fn default() -> Self {
        Self { dir: PathBuf::from("tools/setup/emoji"), tables: TableFiles::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one sub-directory per fingerprint.
    pub base: PathBuf,
    /// Fall back to `sudo` when the base directory can't be created.
    pub provision: bool,
}
impl Default for CacheConfig {
    fn default() -> Self {
        Self { base: PathBuf::from("/srv/emoji-cache"), provision: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Symlink repointed at the cache entry.
    pub dump: PathBuf,
    /// Directory reconciled from the cache entry's `emoji-styles/`.
    pub styles: PathBuf,
}
impl Default for PublishConfig {
    fn default() -> Self {
        Self { dump: PathBuf::from("static/generated/emoji"), styles: PathBuf::from("web/generated/emoji-styles") }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Image tool used to re-encode spritesheets (looked up on `PATH`).
    pub program: String,
}
impl Default for EncoderConfig {
    fn default() -> Self {
        Self { program: "vips".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesheetConfig {
    /// URL prefix under which the dump directory is served.
    pub asset_url: String,
}
impl Default for StylesheetConfig {
    fn default() -> Self {
        Self { asset_url: "/static/generated/emoji".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository root; every relative path is resolved against it.
    pub root: PathBuf,
    pub node_modules: PathBuf,
    pub inputs: Inputs,
    pub cache: CacheConfig,
    pub publish: PublishConfig,
    pub overrides: Overrides,
    pub sets: Vec<EmojiSet>,
    /// Newest dataset: source of the picker catalog and of coverage backfill.
    pub reference_set: String,
    /// Set whose farm backs the legacy alias-named farm.
    pub legacy_set: String,
    /// Vendors that must all ship an image for an emoji to be supported.
    pub supported_vendors: Vec<String>,
    pub encoder: EncoderConfig,
    pub stylesheet: StylesheetConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            node_modules: PathBuf::from("node_modules"),
            inputs: Inputs::default(),
            cache: CacheConfig::default(),
            publish: PublishConfig::default(),
            overrides: Overrides::default(),
            sets: EmojiSet::defaults(),
            reference_set: "google".to_string(),
            legacy_set: "google".to_string(),
            supported_vendors: vec!["google".to_string(), "twitter".to_string()],
            encoder: EncoderConfig::default(),
            stylesheet: StylesheetConfig::default(),
        }
    }
}

impl Config {
    /// Loads and validates configuration from every provider layer.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(explicit)?.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(root = %config.root.display(), sets = config.sets.len(), "Configuration loaded");
        Ok(config)
    }

    /// The merged provider stack, without extracting it.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(dirs) = ProjectDirs::from("", "", "moji") {
            figment = figment.merge(Toml::file(dirs.config_dir().join(CONFIG_FILE)));
        }
        if let Some(path) = explicit {
            // figment silently skips missing files; an explicit one must exist.
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Joins relative paths onto [`root`](Self::root); absolute paths pass through.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match path.is_absolute() {
            true => path.to_path_buf(),
            false => self.root.join(path),
        }
    }

    pub fn set(&self, name: &str) -> Option<&EmojiSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sets.is_empty() {
            exn::bail!(ErrorKind::Invalid("no emoji sets configured".to_string()));
        }
        let mut seen = HashSet::new();
        for set in &self.sets {
            if !seen.insert(set.name.as_str()) {
                exn::bail!(ErrorKind::Invalid(format!("emoji set `{}` configured twice", set.name)));
            }
            // Set names become file names in the cache entry.
            if set.name.is_empty() || set.name.contains(['/', '\\']) || set.name.starts_with('.') {
                exn::bail!(ErrorKind::Invalid(format!("emoji set name `{}` is not a valid file name", set.name)));
            }
        }
        for (role, name) in [("reference_set", &self.reference_set), ("legacy_set", &self.legacy_set)] {
            if self.set(name).is_none() {
                exn::bail!(ErrorKind::Invalid(format!("{role} `{name}` is not a configured emoji set")));
            }
        }
        if self.sets.iter().any(|s| s.backfill && s.name == self.reference_set) {
            exn::bail!(ErrorKind::Invalid("the reference set can't backfill from itself".to_string()));
        }
        Ok(())
    }
}
