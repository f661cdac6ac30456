//! Error types for SimMETIS user commands.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the failing condition: loading configuration data, or referring to a
//! keyword the store does not know.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing configuration data.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config data at line {line}: {reason}")]
    Parse {
        line: usize,
        reason: String,
    },

    #[error("Keyword '{key}' is defined twice in the default data (line {line})")]
    DuplicateKey {
        key: String,
        line: usize,
    },

    #[error("Default config data contains no keywords")]
    Empty,
}

impl ConfigLoadError {
    /// Creates a parse error for a 1-based line number.
    #[must_use]
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// A keyword that is not part of the default table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Keyword not found: {key}")]
pub struct KeyNotFoundError {
    pub key: String,
}

impl KeyNotFoundError {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Top-level error type for SimMETIS.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Config load error: {0}")]
    Load(#[from] ConfigLoadError),

    #[error(transparent)]
    KeyNotFound(#[from] KeyNotFoundError),
}

impl SimError {
    /// Returns true if this is a load error.
    #[must_use]
    pub const fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Returns true if this is an unknown-keyword error.
    #[must_use]
    pub const fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }

    /// The keyword the error refers to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyNotFound(e) => Some(&e.key),
            Self::Load(ConfigLoadError::DuplicateKey { key, .. }) => Some(key),
            Self::Load(_) => None,
        }
    }
}

/// Result type alias for SimMETIS operations.
pub type SimResult<T> = Result<T, SimError>;
