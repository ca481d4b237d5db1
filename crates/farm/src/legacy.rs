//! Legacy alias-named farm.
//!
//! Older clients address emoji by name (`images/emoji/<name>.png`) or by
//! codepoint (`images/emoji/unicode/<code>.png`). Both are relative symlinks
//! into one set's flat farm, so they survive the cache entry being moved or
//! served through the published dump link.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use moji_data::{CustomImage, EmojiCode, StaticTables, vendor::farm_dir};
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tracing::instrument;

#[cfg(unix)]
use std::os::unix::fs::symlink;
#[cfg(windows)]
use std::os::windows::fs::symlink_file as symlink;

pub const LEGACY_DIR: &str = "images/emoji";
pub const UNICODE_DIR: &str = "unicode";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LegacyStats {
    pub names: usize,
    pub codepoints: usize,
    /// Codepoint links skipped because a synonym already created them.
    pub synonyms: usize,
}

/// Builds `<entry>/images/emoji/` pointing into `<entry>/images-<set>-64/`.
#[instrument(skip(tables, custom), fields(entry = %entry.display()))]
pub fn assemble(entry: &Path, set: &str, tables: &StaticTables, custom: &CustomImage) -> Result<LegacyStats> {
    let names_dir = entry.join(LEGACY_DIR);
    let unicode_dir = names_dir.join(UNICODE_DIR);
    std::fs::create_dir_all(&unicode_dir).or_raise(|| ErrorKind::Io)?;

    // Link targets, relative to the directory the link lives in.
    let from_names = Path::new("../..").join(farm_dir(set));
    let from_unicode = Path::new("../../..").join(farm_dir(set));

    let mut stats = LegacyStats::default();
    for (name, code) in &tables.legacy_map {
        let image = tables.remap(code).file_name();
        link(&from_names.join(&image), &names_dir.join(format!("{name}.png")))?;
        stats.names += 1;
        let unicode = unicode_dir.join(code.file_name());
        match symlink(from_unicode.join(&image), &unicode) {
            Ok(()) => stats.codepoints += 1,
            Err(e) if e.kind() == IoErrorKind::AlreadyExists => stats.synonyms += 1,
            Err(e) => return Err(e).or_raise(|| ErrorKind::Link(unicode)),
        }
    }

    let custom_file = format!("{}.png", custom.name);
    link(&from_names.join(&custom_file), &names_dir.join(&custom_file))?;
    link(&from_unicode.join(&custom_file), &unicode_dir.join(&custom_file))?;

    tracing::debug!(
        names = stats.names,
        codepoints = stats.codepoints,
        synonyms = stats.synonyms,
        "Legacy emoji farm assembled"
    );
    Ok(stats)
}

/// Path of `code`'s link in the unicode directory, relative to the entry.
pub fn unicode_link(code: &EmojiCode) -> PathBuf {
    Path::new(LEGACY_DIR).join(UNICODE_DIR).join(code.file_name())
}

fn link(target: &Path, path: &Path) -> Result<()> {
    symlink(target, path).or_raise(|| ErrorKind::Link(path.to_path_buf()))
}
