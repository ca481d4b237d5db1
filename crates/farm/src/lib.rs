//! Image farms inside a cache entry.
//!
//! [`set`] copies vendor images into one flat `images-<set>-64/` directory per
//! emoji set. [`legacy`] then builds the alias-named link farm on top of one
//! of those.

pub mod error;
pub mod legacy;
pub mod set;

pub use crate::legacy::LegacyStats;
pub use crate::set::FarmStats;
