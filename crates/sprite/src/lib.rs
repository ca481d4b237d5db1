mod encode;
pub mod error;
pub mod grid;
pub mod stylesheet;

pub use crate::encode::{SheetEncoder, Vips, sheet_file};
pub use crate::grid::{Percent, SheetGrid};
pub use crate::stylesheet::{Backfill, Stylesheets};
