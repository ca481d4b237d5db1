//! Picker catalog: supported, named emoji grouped by category.

use crate::error::{ErrorKind, Result};
use crate::models::{EmojiCode, EmojiRecord};
use crate::support::SupportPredicate;
use crate::tables::StaticTables;
use std::collections::{BTreeMap, BTreeSet};

/// Category name to emoji codes, each list in the vendor's display order.
pub type Catalog = BTreeMap<String, Vec<EmojiCode>>;

/// Codes of every supported record in `records`.
pub fn supported_codes(records: &[EmojiRecord], support: &impl SupportPredicate) -> BTreeSet<EmojiCode> {
    records.iter().filter(|r| support.is_supported(r)).map(EmojiRecord::code).collect()
}

/// Groups the reference dataset's supported, named emoji by category and
/// orders each group by the vendor's `sort_order`. Records without a category
/// are skipped, as are codes missing from the picker map.
pub fn generate(records: &[EmojiRecord], tables: &StaticTables, support: &impl SupportPredicate) -> Catalog {
    let mut catalog: BTreeMap<String, Vec<(u32, EmojiCode)>> = BTreeMap::new();
    for record in records {
        let code = record.code();
        if !support.is_supported(record) || !tables.names.contains_key(&code) {
            continue;
        }
        let Some(category) = &record.category else {
            continue;
        };
        catalog.entry(category.clone()).or_default().push((record.sort_order.unwrap_or(u32::MAX), code));
    }
    catalog
        .into_iter()
        .map(|(category, mut codes)| {
            // Stable sort: ties keep dataset order.
            codes.sort_by_key(|(order, _)| *order);
            (category, codes.into_iter().map(|(_, code)| code).collect())
        })
        .collect()
}

/// Every codepoint in the picker map must be supported by the reference
/// dataset, otherwise the picker would offer names that render as nothing.
pub fn validate(records: &[EmojiRecord], tables: &StaticTables, support: &impl SupportPredicate) -> Result<()> {
    let supported = supported_codes(records, support);
    if let Some(code) = tables.names.keys().find(|code| !supported.contains(*code)) {
        exn::bail!(ErrorKind::UnsupportedEmoji(code.to_string()));
    }
    Ok(())
}
