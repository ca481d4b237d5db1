//! Publishing a built cache entry into the repository.
//!
//! The dump directory is a symlink flipped atomically onto the entry
//! ([`repoint`]). The stylesheets are copied instead ([`reconcile`]), since
//! the frontend bundler doesn't follow links out of the source tree.

pub mod error;
mod reconcile;
mod symlink;
mod tree;

pub use crate::reconcile::{Reconciled, reconcile};
pub use crate::symlink::repoint;
pub use crate::tree::Tree;
