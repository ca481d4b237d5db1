//! Per-set image farm: one flat directory of `<code>.png` files per emoji set.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use moji_data::{Cell, EmojiRecord, EmojiSet, Overrides, VendorPackage};
use std::path::{Path, PathBuf};
use tracing::instrument;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FarmStats {
    pub copied: usize,
    /// Cells whose code already had an image in the farm.
    pub duplicates: usize,
}

/// Fills `<entry>/images-<set>-64/` from the set's vendor package.
///
/// Every cell flagged `has_img_<alt_name>` is copied to `<code>.png`, skin-tone
/// variations included. The first cell to claim a code wins. The custom image
/// and pinned image are copied last, replacing whatever the vendor provided.
#[instrument(skip_all, fields(set = %set.name))]
pub fn assemble(
    set: &EmojiSet,
    package: &VendorPackage,
    records: &[EmojiRecord],
    overrides: &Overrides,
    entry: &Path,
) -> Result<FarmStats> {
    let farm = entry.join(set.farm_dir());
    std::fs::create_dir_all(&farm).or_raise(|| ErrorKind::Io)?;
    let mut stats = FarmStats::default();
    let flagged = records.iter().flat_map(EmojiRecord::cells).filter(|cell| cell.has_image(set.alt_name()));
    for cell in flagged {
        match copy_new(&package.image(cell), &farm_path(&farm, cell))? {
            true => stats.copied += 1,
            false => stats.duplicates += 1,
        }
    }
    copy_override(&overrides.custom.source, &farm.join(format!("{}.png", overrides.custom.name)))?;
    copy_override(&overrides.pinned.source, &farm.join(overrides.pinned.code.file_name()))?;
    tracing::debug!(copied = stats.copied, duplicates = stats.duplicates, "Emoji farm assembled");
    Ok(stats)
}

fn farm_path(farm: &Path, cell: &Cell) -> PathBuf {
    farm.join(cell.code().file_name())
}

/// Copies `source` to `target` unless `target` already exists.
fn copy_new(source: &Path, target: &Path) -> Result<bool> {
    if target.exists() {
        tracing::trace!(target = %target.display(), "Farm image already present; skipping");
        return Ok(false);
    }
    if !source.is_file() {
        exn::bail!(ErrorKind::MissingImage(source.to_path_buf()));
    }
    std::fs::copy(source, target).or_raise(|| ErrorKind::Io)?;
    Ok(true)
}

fn copy_override(source: &Path, target: &Path) -> Result<()> {
    if !source.is_file() {
        exn::bail!(ErrorKind::MissingImage(source.to_path_buf()));
    }
    std::fs::copy(source, target).or_raise(|| ErrorKind::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moji_data::{CustomImage, EmojiCode, PinnedImage};
    use rstest::rstest;
    use std::fs;

    struct Fixture {
        dir: tempfile::TempDir,
        set: EmojiSet,
        package: VendorPackage,
        overrides: Overrides,
    }
    impl Fixture {
        fn new(set: EmojiSet) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let package = VendorPackage::new(&dir.path().join("node_modules"), &set);
            fs::create_dir_all(package.images()).unwrap();
            let overrides = Overrides {
                custom: CustomImage { name: "zulip".into(), source: dir.path().join("zulip.png") },
                pinned: PinnedImage { code: EmojiCode::new("1f419"), source: dir.path().join("1f419.png") },
            };
            fs::write(&overrides.custom.source, b"custom").unwrap();
            fs::write(&overrides.pinned.source, b"pinned").unwrap();
            Self { dir, set, package, overrides }
        }

        fn image(&self, name: &str, content: &str) {
            fs::write(self.package.images().join(name), content).unwrap();
        }

        fn entry(&self) -> PathBuf {
            self.dir.path().join("entry")
        }

        fn farm(&self, file: &str) -> String {
            fs::read_to_string(self.entry().join(self.set.farm_dir()).join(file)).unwrap()
        }

        fn assemble(&self, records: &[EmojiRecord]) -> Result<FarmStats> {
            assemble(&self.set, &self.package, records, &self.overrides, &self.entry())
        }
    }

    fn records(json: &str) -> Vec<EmojiRecord> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_copies_flagged_images_and_variations() {
        let fixture = Fixture::new(EmojiSet::new("twitter", "emoji-datasource-twitter"));
        fixture.image("1f44d.png", "thumbs");
        fixture.image("1f44d-1f3fb.png", "thumbs light");
        let records = records(
            r#"[
                {"unified": "1F44D", "image": "1f44d.png", "sheet_x": 0, "sheet_y": 0, "has_img_twitter": true,
                 "skin_variations": {"1F3FB": {"unified": "1F44D-1F3FB", "image": "1f44d-1f3fb.png", "sheet_x": 0, "sheet_y": 1, "has_img_twitter": true}}},
                {"unified": "1F9CC", "image": "1f9cc.png", "sheet_x": 1, "sheet_y": 0, "has_img_twitter": false}
            ]"#,
        );
        let stats = fixture.assemble(&records).unwrap();
        assert_eq!(stats, FarmStats { copied: 2, duplicates: 0 });
        assert_eq!(fixture.farm("1f44d.png"), "thumbs");
        assert_eq!(fixture.farm("1f44d-1f3fb.png"), "thumbs light");
        assert!(!fixture.entry().join("images-twitter-64/1f9cc.png").exists());
        assert_eq!(fixture.farm("zulip.png"), "custom");
    }

    #[test]
    fn test_uses_alt_name_flags_and_directories() {
        let set = EmojiSet::new("google-blob", "emoji-datasource-google-blob").with_alt_name("google");
        let fixture = Fixture::new(set);
        fixture.image("1f600.png", "blob grin");
        let records = records(r#"[{"unified": "1F600", "image": "1f600.png", "sheet_x": 0, "sheet_y": 0, "has_img_google": true}]"#);
        fixture.assemble(&records).unwrap();
        assert_eq!(fixture.farm("1f600.png"), "blob grin");
    }

    #[test]
    fn test_first_writer_wins() {
        let fixture = Fixture::new(EmojiSet::new("google", "emoji-datasource-google"));
        fixture.image("263a-fe0f.png", "first");
        fixture.image("263a.png", "second");
        let records = records(
            r#"[
                {"unified": "263A-FE0F", "non_qualified": "263A", "image": "263a-fe0f.png", "sheet_x": 0, "sheet_y": 0, "has_img_google": true},
                {"unified": "263A", "image": "263a.png", "sheet_x": 0, "sheet_y": 1, "has_img_google": true}
            ]"#,
        );
        let stats = fixture.assemble(&records).unwrap();
        assert_eq!(stats, FarmStats { copied: 1, duplicates: 1 });
        assert_eq!(fixture.farm("263a.png"), "first");
    }

    #[test]
    fn test_pinned_image_replaces_vendor_image() {
        let fixture = Fixture::new(EmojiSet::new("google", "emoji-datasource-google"));
        fixture.image("1f419.png", "vendor octopus");
        let records = records(r#"[{"unified": "1F419", "image": "1f419.png", "sheet_x": 0, "sheet_y": 0, "has_img_google": true}]"#);
        fixture.assemble(&records).unwrap();
        assert_eq!(fixture.farm("1f419.png"), "pinned");
    }

    #[rstest]
    #[case::flagged_image("1f600.png", "img/google/64/1f600.png")]
    #[case::custom_image("zulip.png", "zulip.png")]
    #[case::pinned_image("1f419.png", "1f419.png")]
    fn test_missing_image(#[case] removed: &str, #[case] reported: &str) {
        let fixture = Fixture::new(EmojiSet::new("google", "emoji-datasource-google"));
        fixture.image("1f600.png", "grin");
        match removed {
            "1f600.png" => fs::remove_file(fixture.package.images().join(removed)).unwrap(),
            _ => fs::remove_file(fixture.dir.path().join(removed)).unwrap(),
        }
        let records = records(r#"[{"unified": "1F600", "image": "1f600.png", "sheet_x": 0, "sheet_y": 0, "has_img_google": true}]"#);
        let err = fixture.assemble(&records).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingImage(path) if path.ends_with(reported)));
    }
}
