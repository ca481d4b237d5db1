//! Content-addressed build cache.
//!
//! Every build is keyed by a [`Fingerprint`] of all of its inputs. The output
//! lands in `<base>/<fingerprint>/` and counts as complete only once the
//! success stamp is written, so an interrupted build is never mistaken for a
//! finished one and identical inputs never rebuild.

mod entry;
pub mod error;
mod fingerprint;
mod root;

pub use crate::entry::{CacheEntry, Outcome, SUCCESS_STAMP};
pub use crate::fingerprint::Fingerprint;
pub use crate::root::CacheRoot;
