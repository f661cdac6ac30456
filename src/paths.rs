//! Data directory resolution and data-file checks.
//!
//! Keywords such as `FPA_QE` or `SCOPE_PSF_FILE` name instrument data files.
//! Relative names resolve against the data directory, chosen in this order:
//! the `SIM_DATA_DIR` keyword when set, the `SIMMETIS_DATA_DIR` environment
//! variable, then the `data/` directory packaged with the crate.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::value::Value;

/// Environment variable overriding the packaged data directory.
pub const DATA_DIR_ENV: &str = "SIMMETIS_DATA_DIR";

/// Keyword holding the data directory.
pub const DATA_DIR_KEY: &str = "SIM_DATA_DIR";

/// File extensions that mark a string value as a data file reference.
pub const DATA_FILE_EXTENSIONS: &[&str] = &["dat", "fits", "txt", "tbl", "config"];

/// The `data/` directory shipped with the crate.
#[must_use]
pub fn packaged_data_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

/// Resolves the data directory from the `SIM_DATA_DIR` value and the environment.
#[must_use]
pub fn resolve_data_dir(sim_data_dir: Option<&Value>) -> PathBuf {
    resolve_data_dir_with(sim_data_dir, std::env::var_os(DATA_DIR_ENV))
}

fn resolve_data_dir_with(sim_data_dir: Option<&Value>, env: Option<OsString>) -> PathBuf {
    if let Some(dir) = sim_data_dir.and_then(Value::as_str).filter(|s| !s.is_empty()) {
        return PathBuf::from(dir);
    }
    match env {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => packaged_data_dir(),
    }
}

/// Returns the path if `value` is a string naming a data file.
#[must_use]
pub fn data_file_name(value: &Value) -> Option<&Path> {
    let path = Path::new(value.as_str()?);
    let ext = path.extension()?.to_str()?;
    DATA_FILE_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
        .then_some(path)
}

/// A data file referenced by a keyword that does not exist on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPath {
    pub key: String,
    pub path: PathBuf,
}

/// Collects every referenced data file that is absent from `data_dir`.
///
/// List values are searched one level deep. Absolute paths are checked as-is.
pub fn missing_paths<'a, I>(entries: I, data_dir: &Path) -> Vec<MissingPath>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut missing = Vec::new();
    for (key, value) in entries {
        let candidates: Vec<&Path> = match value {
            Value::List(items) => items.iter().filter_map(data_file_name).collect(),
            other => data_file_name(other).into_iter().collect(),
        };
        for name in candidates {
            let path = data_dir.join(name);
            if !path.exists() {
                missing.push(MissingPath {
                    key: key.to_string(),
                    path,
                });
            }
        }
    }
    missing
}
