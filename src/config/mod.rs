//! Configuration data: the text format, the packaged defaults and the
//! keyword allow-list derived from them.

pub mod defaults;
pub mod keys;
pub mod parser;

pub use defaults::{DefaultTable, DEFAULT_CONFIG, DEFAULT_CONFIG_NAME};
pub use keys::KeySet;
pub use parser::{parse_str, parse_value, Entry};
