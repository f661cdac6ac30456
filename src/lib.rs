//! # SimMETIS user commands
//!
//! The configuration store of the SimMETIS instrument simulator. A simulation
//! run is driven by a set of keywords (`OBS_EXPTIME`, `FPA_QE`, ...) whose
//! defaults ship with the package. Users override them in code or through a
//! config file, and only keywords from the default table are accepted.
//!
//! ## Core Concepts
//!
//! - **UserCommands**: keyword/value store seeded from the default table
//! - **Value**: scalar or list value held by a keyword
//! - **KeySet**: frozen allow-list of keywords captured from the defaults
//! - **DefaultTable**: the packaged `default.config`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simmetis::UserCommands;
//!
//! let mut cmds = UserCommands::with_file("my_run.config")?;
//! cmds.update([("OBS_EXPTIME", 30), ("OBS_NDIT", 4)])?;
//!
//! for missing in cmds.missing_paths() {
//!     eprintln!("{} -> {}", missing.key, missing.path.display());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod value;

// Re-export primary types at crate root for convenience
pub use commands::UserCommands;
pub use config::{DefaultTable, Entry, KeySet};
pub use error::{ConfigLoadError, KeyNotFoundError, SimError, SimResult};
pub use paths::MissingPath;
pub use value::Value;
