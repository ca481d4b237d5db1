mod code;
mod record;

pub use self::code::EmojiCode;
pub use self::record::{Cell, EmojiRecord};
