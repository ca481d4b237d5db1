//! Which emoji count as "supported".
//!
//! Sprite positions, coverage backfill and the picker catalog only include
//! supported emoji. The rule lives behind [`SupportPredicate`] so the pipeline
//! never has to know how it is decided.

use crate::models::{Cell, EmojiRecord};

pub trait SupportPredicate {
    fn is_supported(&self, record: &EmojiRecord) -> bool;
}

impl<F> SupportPredicate for F
where
    F: Fn(&EmojiRecord) -> bool,
{
    fn is_supported(&self, record: &EmojiRecord) -> bool {
        self(record)
    }
}

/// An emoji is supported when every listed vendor ships an image for it, so
/// users can switch between emoji sets without names disappearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasImageIn {
    vendors: Vec<String>,
}
impl HasImageIn {
    pub fn new<I, S>(vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { vendors: vendors.into_iter().map(Into::into).collect() }
    }

    fn cell_supported(&self, cell: &Cell) -> bool {
        self.vendors.iter().all(|vendor| cell.has_image(vendor))
    }
}
impl Default for HasImageIn {
    fn default() -> Self {
        Self::new(["google", "twitter"])
    }
}
impl SupportPredicate for HasImageIn {
    fn is_supported(&self, record: &EmojiRecord) -> bool {
        self.cell_supported(&record.cell)
    }
}
