//! User commands: the configuration store for a simulation run.
//!
//! A `UserCommands` starts as a copy of the default table. Its keywords are
//! frozen at that point: values can be replaced, keywords cannot be added or
//! removed. Any attempt to touch an unknown keyword fails with
//! [`KeyNotFoundError`], which catches typos such as `OBS_EXPTIM` before
//! they silently do nothing.
//!
//! ## Usage
//!
//! ```
//! use simmetis::{UserCommands, Value};
//!
//! let mut cmds = UserCommands::new()?;
//! cmds.update([("OBS_EXPTIME", 30)])?;
//! assert_eq!(cmds.get("OBS_EXPTIME")?, &Value::Int(30));
//!
//! assert!(cmds.update([("NO_EXISTE", 30)]).is_err());
//! assert!(!cmds.contains_key("NO_EXISTE"));
//! # Ok::<(), simmetis::SimError>(())
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, info, warn};

use crate::config::defaults::DefaultTable;
use crate::config::keys::KeySet;
use crate::config::parser::{self, render_line};
use crate::error::{ConfigLoadError, KeyNotFoundError, SimResult};
use crate::paths::{self, MissingPath};
use crate::value::Value;

/// Keyword/value store guarded by the default table's keyword set.
#[derive(Debug, Clone, PartialEq)]
pub struct UserCommands {
    keys: Arc<KeySet>,
    cmds: HashMap<String, Value>,
    comments: Arc<HashMap<String, String>>,
}

impl UserCommands {
    /// Creates a store from the packaged default table.
    ///
    /// # Errors
    /// `Load` if the packaged defaults are malformed.
    pub fn new() -> SimResult<Self> {
        let table = DefaultTable::packaged()?;
        Ok(Self::from_defaults(&table))
    }

    /// Creates a store holding every entry of `table`.
    #[must_use]
    pub fn from_defaults(table: &DefaultTable) -> Self {
        let cmds = table
            .entries()
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect();
        let comments = table
            .entries()
            .iter()
            .filter_map(|e| e.comment.clone().map(|c| (e.key.clone(), c)))
            .collect();

        info!(keywords = table.len(), "loaded default user commands");
        Self {
            keys: Arc::new(table.key_set()),
            cmds,
            comments: Arc::new(comments),
        }
    }

    /// Creates a store from default data given as config text.
    ///
    /// # Errors
    /// `Load` if the text is malformed, empty, or repeats a keyword.
    pub fn from_defaults_str(text: &str) -> SimResult<Self> {
        let table = DefaultTable::parse(text)?;
        Ok(Self::from_defaults(&table))
    }

    /// Creates a store from the packaged defaults, then applies a user
    /// config file on top of it.
    ///
    /// # Errors
    /// - `Load` if the file cannot be read or parsed
    /// - `KeyNotFound` if the file sets a keyword the defaults do not define
    pub fn with_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let mut cmds = Self::new()?;
        cmds.update_from_file(path)?;
        Ok(cmds)
    }

    /// Current value of `key`.
    ///
    /// # Errors
    /// `KeyNotFound` if `key` is not in the default table.
    pub fn get(&self, key: &str) -> SimResult<&Value> {
        self.keys.check(key)?;
        // Every allowed keyword is present in `cmds` from construction on.
        self.cmds
            .get(key)
            .ok_or_else(|| KeyNotFoundError::new(key).into())
    }

    /// Replaces the values of existing keywords.
    ///
    /// Every keyword is checked before anything is written, so a batch that
    /// names an unknown keyword leaves the store untouched. Within a batch,
    /// later entries for the same keyword win.
    ///
    /// # Errors
    /// `KeyNotFound` naming the first unknown keyword.
    pub fn update<I, K, V>(&mut self, changes: I) -> SimResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let changes: Vec<(String, Value)> = changes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for (key, _) in &changes {
            if let Err(e) = self.keys.check(key) {
                warn!(key = %key, "rejected update of unknown keyword");
                return Err(e.into());
            }
        }

        for (key, value) in changes {
            debug!(key = %key, value = %value, "updating keyword");
            self.cmds.insert(key, value);
        }
        Ok(())
    }

    /// Replaces the value of a single keyword.
    ///
    /// # Errors
    /// `KeyNotFound` if `key` is not in the default table.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> SimResult<()> {
        self.update([(key.into(), value.into())])
    }

    /// Applies config text as an update.
    ///
    /// # Errors
    /// - `Load` if the text is malformed
    /// - `KeyNotFound` if it sets an unknown keyword; nothing is applied then
    pub fn update_from_str(&mut self, text: &str) -> SimResult<()> {
        let entries = parser::parse_str(text)?;
        self.update(entries.into_iter().map(|e| (e.key, e.value)))
    }

    /// Reads a config file and applies it as an update.
    ///
    /// # Errors
    /// - `Load` if the file cannot be read or parsed
    /// - `KeyNotFound` if it sets an unknown keyword; nothing is applied then
    pub fn update_from_file(&mut self, path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.update_from_str(&text)?;
        info!(path = %path.display(), "applied user config file");
        Ok(())
    }

    /// Returns true if `key` is in the default table.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Keywords in default-table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter()
    }

    /// Keyword/value pairs in default-table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keys
            .iter()
            .filter_map(move |k| self.cmds.get(k).map(|v| (k, v)))
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the store has no keywords.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The raw keyword map.
    #[must_use]
    pub fn cmds(&self) -> &HashMap<String, Value> {
        &self.cmds
    }

    /// The frozen keyword allow-list.
    pub fn key_set(&self) -> &KeySet {
        &self.keys
    }

    /// Renders the store as config text, one keyword per line.
    #[must_use]
    pub fn to_config_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            let comment = self.comments.get(key).map(String::as_str);
            out.push_str(&render_line(key, value, comment));
            out.push('\n');
        }
        out
    }

    /// Renders the store as a JSON object in default-table order.
    ///
    /// # Errors
    /// Whatever `serde_json` reports while serializing.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Directory that relative data file names resolve against.
    pub fn data_dir(&self) -> PathBuf {
        paths::resolve_data_dir(self.cmds.get(paths::DATA_DIR_KEY))
    }

    /// Data files referenced by the current values that do not exist.
    pub fn missing_paths(&self) -> Vec<MissingPath> {
        paths::missing_paths(self.iter(), &self.data_dir())
    }
}

impl std::fmt::Display for UserCommands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_config_string())
    }
}

/// Serializes as a map in default-table order.
impl Serialize for UserCommands {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
