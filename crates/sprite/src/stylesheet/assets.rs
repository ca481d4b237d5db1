//! Stylesheet templates embedded into the binary at compile time using
//! [`rust-embed`](rust_embed).

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "../../assets/css/"]
pub(crate) struct Templates;
impl Templates {
    pub(crate) const SPRITE: &'static str = "sprite.css";

    /// Template source for an embedded stylesheet by name.
    pub(crate) fn load(name: impl AsRef<str>) -> Result<String> {
        let name = name.as_ref();
        let file = Self::get(name).ok_or_raise(|| ErrorKind::AssetNotFound(format!("builtin:{name}")))?;
        String::from_utf8(file.data.into_owned()).or_raise(|| ErrorKind::AssetNotFound(format!("builtin:{name}")))
    }
}
