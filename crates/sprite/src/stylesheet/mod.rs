//! Per-set sprite stylesheets.
//!
//! Each set gets one stylesheet mapping `.emoji-<code>` classes onto cells of
//! that set's spritesheet. The embedded `sprite.css` template is compiled once
//! and rendered per set with an upon context built from vendor records.

mod assets;

use crate::error::{ErrorKind, Result};
use crate::grid::SheetGrid;
use crate::stylesheet::assets::Templates;
use exn::ResultExt;
use moji_data::catalog::supported_codes;
use moji_data::{EmojiCode, EmojiRecord, SupportPredicate};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::instrument;
use upon::{Engine, Template};

/// Directory, inside a cache entry, holding every rendered stylesheet.
pub const STYLES_DIR: &str = "emoji-styles";

/// Stylesheet file name for `set`.
pub fn file_name(set: &str) -> String {
    format!("{set}-sprite.css")
}

/// The reference dataset a set falls back on for emoji it doesn't cover.
#[derive(Debug, Clone, Copy)]
pub struct Backfill<'a> {
    /// Name of the reference set, whose farm serves the fallback images.
    pub reference: &'a str,
    pub records: &'a [EmojiRecord],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub code: EmojiCode,
    pub x: String,
    pub y: String,
}

#[derive(Serialize)]
struct Context<'a> {
    asset_url: &'a str,
    set: &'a str,
    background_size: String,
    pinned: &'a EmojiCode,
    positions: Vec<Position>,
    reference: Option<&'a str>,
    backfill: Vec<EmojiCode>,
}

pub struct Stylesheets {
    engine: Engine<'static>,
    template: Template<'static>,
    asset_url: String,
    pinned: EmojiCode,
}
impl Stylesheets {
    /// Compiles the embedded template up front so a broken template fails
    /// before any set is built.
    pub fn new(asset_url: impl AsRef<str>, pinned: EmojiCode) -> Result<Self> {
        let engine = Engine::new();
        let template = engine.compile(Templates::load(Templates::SPRITE)?).or_raise(|| ErrorKind::Template)?;
        let asset_url = asset_url.as_ref().trim_end_matches('/').to_string();
        Ok(Self { engine, template, asset_url, pinned })
    }

    /// Renders the stylesheet for `set` from that set's own vendor `records`.
    #[instrument(skip_all, fields(set = set))]
    pub fn render(
        &self,
        set: &str,
        records: &[EmojiRecord],
        support: &impl SupportPredicate,
        backfill: Option<Backfill<'_>>,
    ) -> Result<String> {
        let grid = SheetGrid::measure(records);
        let context = Context {
            asset_url: &self.asset_url,
            set,
            background_size: grid.background_size().to_string(),
            pinned: &self.pinned,
            positions: positions(&grid, records, support),
            reference: backfill.map(|b| b.reference),
            backfill: backfill.map(|b| backfill_codes(records, b.records, support)).unwrap_or_default(),
        };
        tracing::debug!(
            grid = grid.size(),
            positions = context.positions.len(),
            backfill = context.backfill.len(),
            "Rendering sprite stylesheet"
        );
        self.template.render(&self.engine, &context).to_string().or_raise(|| ErrorKind::Template)
    }
}

/// One position per supported record, in dataset order. Skin-tone variations
/// share the grid but aren't addressable by class.
pub fn positions(grid: &SheetGrid, records: &[EmojiRecord], support: &impl SupportPredicate) -> Vec<Position> {
    records
        .iter()
        .filter(|record| support.is_supported(record))
        .map(|record| {
            let (x, y) = grid.position(&record.cell);
            Position { code: record.code(), x: x.to_string(), y: y.to_string() }
        })
        .collect()
}

/// Codes the reference dataset supports that `own` doesn't, in reference
/// dataset order and without duplicates.
pub fn backfill_codes(
    own: &[EmojiRecord],
    reference: &[EmojiRecord],
    support: &impl SupportPredicate,
) -> Vec<EmojiCode> {
    let covered = supported_codes(own, support);
    let mut seen = BTreeSet::new();
    reference
        .iter()
        .filter(|record| support.is_supported(record))
        .map(EmojiRecord::code)
        .filter(|code| !covered.contains(code) && seen.insert(code.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::record;
    use moji_data::HasImageIn;

    fn unsupported(code: &str, x: u32, y: u32) -> EmojiRecord {
        let json = format!(
            r#"{{"unified": "{code}", "image": "{code}.png", "sheet_x": {x}, "sheet_y": {y}, "has_img_google": true}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn stylesheets() -> Stylesheets {
        Stylesheets::new("/static/generated/emoji/", EmojiCode::new("1f419")).unwrap()
    }

    #[test]
    fn test_positions_skip_unsupported() {
        let records = [record("1f600", 0, 0, ""), unsupported("1f9cc", 0, 1), record("1f602", 1, 0, "")];
        let grid = SheetGrid::measure(&records);
        let positions = positions(&grid, &records, &HasImageIn::default());
        assert_eq!(
            positions,
            [
                Position { code: EmojiCode::new("1f600"), x: "0%".into(), y: "0%".into() },
                Position { code: EmojiCode::new("1f602"), x: "100%".into(), y: "0%".into() },
            ]
        );
    }

    #[test]
    fn test_backfill_codes() {
        let own = [record("1f600", 0, 0, ""), unsupported("1f601", 0, 1)];
        let reference = [
            record("1f600", 0, 0, ""),
            record("1f601", 0, 1, ""),
            record("1f601", 0, 1, ""),
            unsupported("1f9cc", 1, 1),
            record("1f602", 1, 0, ""),
        ];
        let codes = backfill_codes(&own, &reference, &HasImageIn::default());
        assert_eq!(codes, [EmojiCode::new("1f601"), EmojiCode::new("1f602")]);
    }

    #[test]
    fn test_render_shared_rule_and_positions() {
        let records = [record("1f600", 0, 0, ""), record("1f601", 0, 1, ""), record("1f602", 1, 0, "")];
        let css = stylesheets().render("google", &records, &HasImageIn::default(), None).unwrap();
        assert!(css.contains(r#"background-image: url("/static/generated/emoji/google.webp");"#));
        assert!(css.contains("background-size: 200%;"));
        assert!(css.contains(".emoji-1f600 {\n    background-position: 0% 0%;\n}"));
        assert!(css.contains(".emoji-1f601 {\n    background-position: 0% 100%;\n}"));
        assert!(css.contains(".emoji-1f602 {\n    background-position: 100% 0%;\n}"));
        assert!(!css.contains("images-google-64/1f600.png"));
    }

    #[test]
    fn test_render_pinned_override() {
        let records = [record("1f419", 0, 0, ""), record("1f600", 0, 1, "")];
        let css = stylesheets().render("twitter", &records, &HasImageIn::default(), None).unwrap();
        let rule = css.split(".emoji-1f419 {").nth(1).unwrap();
        assert!(rule.contains(r#"url("/static/generated/emoji/images-twitter-64/1f419.png") !important"#));
        assert!(rule.contains("background-position: 0 0 !important;"));
        assert!(rule.contains("background-size: contain !important;"));
    }

    #[test]
    fn test_render_backfill() {
        let own = [record("1f600", 0, 0, "")];
        let reference = [record("1f600", 0, 0, ""), record("1f602", 1, 0, "")];
        let backfill = Backfill { reference: "google", records: &reference };
        let css = stylesheets().render("twitter", &own, &HasImageIn::default(), Some(backfill)).unwrap();
        assert!(css.contains(r#"url("/static/generated/emoji/images-google-64/1f602.png") !important"#));
        assert!(!css.contains("images-google-64/1f600.png"));
        // The set's own sheet and grid are still used for covered emoji.
        assert!(css.contains("twitter.webp"));
        assert!(css.contains("background-size: 100%;"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let records = [record("1f600", 0, 0, ""), record("1f602", 1, 0, "")];
        let sheets = stylesheets();
        let first = sheets.render("google", &records, &HasImageIn::default(), None).unwrap();
        let second = sheets.render("google", &records, &HasImageIn::default(), None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("google-blob"), "google-blob-sprite.css");
    }
}
