//! The packaged default table.

use std::collections::HashMap;

use tracing::debug;

use crate::config::keys::KeySet;
use crate::config::parser::{self, Entry};
use crate::error::ConfigLoadError;
use crate::value::Value;

/// Default configuration shipped with the crate.
pub const DEFAULT_CONFIG: &str = include_str!("../../data/default.config");

/// File name of the packaged defaults inside the data directory.
pub const DEFAULT_CONFIG_NAME: &str = "default.config";

/// The recognised keywords and their default values, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTable {
    entries: Vec<Entry>,
}

impl DefaultTable {
    /// Loads the defaults embedded in the crate.
    pub fn packaged() -> Result<Self, ConfigLoadError> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Loads defaults from config text.
    ///
    /// # Errors
    /// - `Parse` for malformed lines
    /// - `DuplicateKey` if a keyword appears twice
    /// - `Empty` if the text defines no keywords
    pub fn parse(text: &str) -> Result<Self, ConfigLoadError> {
        let entries = parser::parse_str(text)?;
        if entries.is_empty() {
            return Err(ConfigLoadError::Empty);
        }

        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
        for entry in &entries {
            if seen.insert(entry.key.as_str(), entry.line).is_some() {
                return Err(ConfigLoadError::DuplicateKey {
                    key: entry.key.clone(),
                    line: entry.line,
                });
            }
        }

        debug!(keywords = entries.len(), "parsed default table");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Default value of `key`, if it is part of the table.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.value)
    }

    /// The allow-list of keywords, in table order.
    #[must_use]
    pub fn key_set(&self) -> KeySet {
        KeySet::from_keys(self.entries.iter().map(|e| e.key.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packaged_defaults_load() {
        let table = DefaultTable::packaged().unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.get("OBS_EXPTIME"), Some(&Value::Int(60)));
        assert_eq!(table.get("OBS_NDIT"), Some(&Value::Int(1)));
        assert_eq!(table.get("SIM_DATA_DIR"), Some(&Value::Null));
        assert_eq!(table.get("SIM_VERBOSE"), Some(&Value::Bool(false)));
        assert_eq!(
            table.get("FPA_CHIP_SIZE"),
            Some(&Value::from(vec![2048, 2048]))
        );
        let exptime = table.entries().iter().find(|e| e.key == "OBS_EXPTIME").unwrap();
        assert_eq!(exptime.comment.as_deref(), Some("[sec] simulated exposure time"));
    }

    #[test]
    fn test_key_set_follows_table_order() {
        let table = DefaultTable::parse("B_KEY 1\nA_KEY 2\n").unwrap();
        let key_set = table.key_set();
        let keys: Vec<&str> = key_set.iter().collect();
        assert_eq!(keys, vec!["B_KEY", "A_KEY"]);
    }

    #[test]
    fn test_empty_defaults_rejected() {
        let err = DefaultTable::parse("# nothing here\n\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Empty));
    }

    #[test]
    fn test_duplicate_defaults_rejected() {
        let err = DefaultTable::parse("OBS_NDIT 1\nOBS_EXPTIME 60\nOBS_NDIT 2\n").unwrap_err();
        match err {
            ConfigLoadError::DuplicateKey { key, line } => {
                assert_eq!(key, "OBS_NDIT");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_defaults_rejected() {
        let err = DefaultTable::parse("OBS_EXPTIME\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse { line: 1, .. }));
    }
}
