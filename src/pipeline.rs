//! The build, end to end.
//!
//! ```text
//! fingerprint inputs ─▶ cache gate ─┬─ hit ──────────────────────────┐
//!                                   └─ miss ─▶ validate              │
//!                                              per set: farm, css,   │
//!                                                       sheet        │
//!                                              legacy farm           │
//!                                              lookup documents      │
//!                                              stamp ────────────────┤
//!                                                                    ▼
//!                                         repoint dump link, reconcile styles
//! ```

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use moji_cache::{CacheRoot, Fingerprint, Outcome};
use moji_config::Config;
use moji_data::lookup::{self, EMOJI_API_FILE, EMOJI_CODES_FILE, EmojiApi, EmojiCodes};
use moji_data::{EmojiRecord, EmojiSet, HasImageIn, Overrides, StaticTables, SupportPredicate, VendorPackage, catalog};
use moji_farm::{legacy, set as farm};
use moji_publish::Reconciled;
use moji_sprite::stylesheet::{self, STYLES_DIR};
use moji_sprite::{Backfill, SheetEncoder, Stylesheets, Vips, sheet_file};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Bump whenever the layout or content of a cache entry changes, so existing
/// entries built by older code stop matching.
const FORMAT_REVISION: u32 = 1;

/// Fingerprint seed identifying the code that produced an entry.
pub fn revision() -> String {
    format!("{}/{}", env!("CARGO_PKG_VERSION"), FORMAT_REVISION)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub fingerprint: String,
    /// Absolute path of the cache entry now published.
    pub entry: PathBuf,
    pub outcome: Outcome,
    pub styles: Reconciled,
}

/// Everything a run reads, with paths resolved against the repository root.
struct Sources {
    tables_dir: PathBuf,
    overrides: Overrides,
    sets: Vec<(EmojiSet, VendorPackage)>,
}

pub struct Pipeline<'a, E = Vips, S = HasImageIn> {
    config: &'a Config,
    encoder: E,
    support: S,
}
impl<'a> Pipeline<'a> {
    /// A pipeline using the configured encoder program and vendor support rule.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            encoder: Vips::new(&config.encoder.program),
            support: HasImageIn::new(config.supported_vendors.iter().cloned()),
        }
    }
}
impl<'a, E: SheetEncoder, S: SupportPredicate> Pipeline<'a, E, S> {
    pub fn with_encoder<T: SheetEncoder>(self, encoder: T) -> Pipeline<'a, T, S> {
        Pipeline { config: self.config, encoder, support: self.support }
    }

    pub fn with_support<T: SupportPredicate>(self, support: T) -> Pipeline<'a, E, T> {
        Pipeline { config: self.config, encoder: self.encoder, support }
    }

    #[instrument(skip_all, fields(root = %self.config.root.display()))]
    pub fn run(&self) -> Result<Report> {
        let sources = self.sources();
        let fingerprint = self.fingerprint(&sources)?;
        tracing::info!(fingerprint = %fingerprint, "Inputs fingerprinted");

        let cache = CacheRoot::new(self.config.resolve(&self.config.cache.base), self.config.cache.provision);
        cache.ensure(&self.config.root).or_raise(|| ErrorKind::Cache)?;
        let entry = cache.entry(&fingerprint);
        let outcome = entry.build_with(|dir| self.build(dir, &sources)).or_raise(|| ErrorKind::Cache)?;

        let entry = std::path::absolute(entry.path()).or_raise(|| ErrorKind::Io)?;
        let styles = self.publish(&entry)?;
        Ok(Report { fingerprint, entry, outcome, styles })
    }

    fn sources(&self) -> Sources {
        let node_modules = self.config.resolve(&self.config.node_modules);
        Sources {
            tables_dir: self.config.resolve(&self.config.inputs.dir),
            overrides: self.config.overrides.resolved(|path| self.config.resolve(path)),
            sets: self.config.sets.iter().map(|set| (set.clone(), VendorPackage::new(&node_modules, set))).collect(),
        }
    }

    /// Digest of every input file plus the configuration that shapes output.
    fn fingerprint(&self, sources: &Sources) -> Result<String> {
        let settings = serde_json::to_vec(&serde_json::json!({
            "sets": self.config.sets,
            "reference_set": self.config.reference_set,
            "legacy_set": self.config.legacy_set,
            "supported_vendors": self.config.supported_vendors,
            "asset_url": self.config.stylesheet.asset_url,
            "custom": sources.overrides.custom.name,
            "pinned": sources.overrides.pinned.code,
        }))
        .or_raise(|| ErrorKind::Config)?;
        let mut fingerprint = Fingerprint::new(revision()).bytes("settings", &settings);
        for (label, path) in self.config.inputs.tables.resolve(&sources.tables_dir) {
            fingerprint = fingerprint.file(label, &path).or_raise(|| ErrorKind::Inputs)?;
        }
        fingerprint = fingerprint
            .file("custom", &sources.overrides.custom.source)
            .or_raise(|| ErrorKind::Inputs)?
            .file("pinned", &sources.overrides.pinned.source)
            .or_raise(|| ErrorKind::Inputs)?;
        for (set, package) in &sources.sets {
            fingerprint = fingerprint
                .file(format!("{}/package.json", set.name), &package.manifest())
                .or_raise(|| ErrorKind::Inputs)?
                .file(format!("{}/emoji.json", set.name), &package.metadata())
                .or_raise(|| ErrorKind::Inputs)?;
        }
        Ok(fingerprint.finish())
    }

    #[instrument(skip_all, fields(entry = %dir.display()))]
    fn build(&self, dir: &Path, sources: &Sources) -> Result<()> {
        let config = self.config;
        let tables = StaticTables::load(&sources.tables_dir, &config.inputs.tables).or_raise(|| ErrorKind::Inputs)?;
        let mut records: BTreeMap<&str, Vec<EmojiRecord>> = BTreeMap::new();
        for (set, package) in &sources.sets {
            records.insert(&set.name, package.load_records().or_raise(|| ErrorKind::Inputs)?);
        }
        let reference = records.get(config.reference_set.as_str()).ok_or_raise(|| ErrorKind::Config)?;
        catalog::validate(reference, &tables, &self.support).or_raise(|| ErrorKind::Lookup)?;

        let stylesheets = Stylesheets::new(&config.stylesheet.asset_url, sources.overrides.pinned.code.clone())
            .or_raise(|| ErrorKind::Template)?;
        let styles_dir = dir.join(STYLES_DIR);
        std::fs::create_dir_all(&styles_dir).or_raise(|| ErrorKind::Io)?;

        for (set, package) in &sources.sets {
            let own = records.get(set.name.as_str()).ok_or_raise(|| ErrorKind::Config)?;
            farm::assemble(set, package, own, &sources.overrides, dir).or_raise(|| ErrorKind::Farm(set.name.clone()))?;

            let backfill = set.backfill.then_some(Backfill { reference: &config.reference_set, records: reference });
            let css = stylesheets
                .render(&set.name, own, &self.support, backfill)
                .or_raise(|| ErrorKind::Stylesheet(set.name.clone()))?;
            std::fs::write(styles_dir.join(stylesheet::file_name(&set.name)), css).or_raise(|| ErrorKind::Io)?;

            self.encoder
                .encode(&package.sheet(), &dir.join(sheet_file(&set.name)))
                .or_raise(|| ErrorKind::Encode(set.name.clone()))?;
            tracing::info!(set = %set.name, "Emoji set built");
        }

        legacy::assemble(dir, &config.legacy_set, &tables, &sources.overrides.custom)
            .or_raise(|| ErrorKind::Farm(config.legacy_set.clone()))?;

        let catalog = catalog::generate(reference, &tables, &self.support);
        lookup::write(&dir.join(EMOJI_CODES_FILE), &EmojiCodes::new(&tables, &catalog)).or_raise(|| ErrorKind::Lookup)?;
        lookup::write(&dir.join(EMOJI_API_FILE), &EmojiApi::new(&tables)).or_raise(|| ErrorKind::Lookup)?;
        Ok(())
    }

    #[instrument(skip_all, fields(entry = %entry.display()))]
    fn publish(&self, entry: &Path) -> Result<Reconciled> {
        moji_publish::repoint(&self.config.resolve(&self.config.publish.dump), entry).or_raise(|| ErrorKind::Publish)?;
        let styles = moji_publish::reconcile(&entry.join(STYLES_DIR), &self.config.resolve(&self.config.publish.styles))
            .or_raise(|| ErrorKind::Publish)?;
        tracing::info!(copied = styles.copied.len(), removed = styles.removed.len(), "Build output published");
        Ok(styles)
    }
}
