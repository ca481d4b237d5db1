//! Emoji asset builder.
//!
//! Turns vendor emoji packages plus a handful of hand-curated tables into
//! per-set image farms, sprite stylesheets, re-encoded spritesheets and JSON
//! lookup documents. Output is cached by input fingerprint and published into
//! the repository; see [`pipeline`] for the flow.

pub mod error;
pub mod pipeline;

pub use crate::pipeline::{Pipeline, Report};
pub use moji_config::Config;
