use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Normalized emoji codepoint, used as the file-naming key for every output.
///
/// Always lowercase, hyphen-separated hex sequences (e.g. `1f44d-1f3fb`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EmojiCode(String);
impl EmojiCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this emoji's image inside a flat farm.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.0)
    }
}
impl From<String> for EmojiCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
impl From<&str> for EmojiCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
impl From<EmojiCode> for String {
    fn from(value: EmojiCode) -> Self {
        value.0
    }
}
impl AsRef<str> for EmojiCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Borrow<str> for EmojiCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}
impl Display for EmojiCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
