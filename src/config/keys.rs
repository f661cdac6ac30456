//! The keyword allow-list.
//!
//! A `KeySet` is captured once from the default table and never changes
//! afterwards. Every keyword check in the crate goes through it.

use std::collections::HashMap;

use crate::error::KeyNotFoundError;

/// Frozen, ordered set of valid keywords.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeySet {
    ordered: Vec<String>,
    index: HashMap<String, usize>,
}

impl KeySet {
    /// Builds the set from keywords in order. Repeats keep their first position.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut set = Self::default();
        for key in keys {
            if !set.index.contains_key(&key) {
                set.index.insert(key.clone(), set.ordered.len());
                set.ordered.push(key);
            }
        }
        set
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Fails with the offending keyword if it is not in the set.
    pub fn check(&self, key: &str) -> Result<(), KeyNotFoundError> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(KeyNotFoundError::new(key))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
