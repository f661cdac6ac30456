//! Tracing setup for applications embedding the user command store.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application through [`init_tracing`].

use tracing_subscriber::{fmt, EnvFilter};

use crate::commands::UserCommands;

/// Level used when `SIM_VERBOSE` is set.
pub const VERBOSE_LEVEL: &str = "debug";

/// Level used otherwise.
pub const DEFAULT_LEVEL: &str = "info";

/// Builds the filter directive for this crate at `level`.
#[must_use]
pub fn filter_directive(level: &str) -> String {
    format!("simmetis={level}")
}

/// Log level matching the store's `SIM_VERBOSE` flag.
#[must_use]
pub fn level_for(cmds: &UserCommands) -> &'static str {
    match cmds.get("SIM_VERBOSE").ok().and_then(|v| v.as_bool()) {
        Some(true) => VERBOSE_LEVEL,
        _ => DEFAULT_LEVEL,
    }
}

/// Installs a compact stdout subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when set. Returns false if a
/// global subscriber was already installed.
pub fn init_tracing(log_level: Option<&str>) -> bool {
    let base_level = log_level.unwrap_or(DEFAULT_LEVEL);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(base_level)));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init()
        .is_ok()
}

/// Installs a subscriber at the level selected by `SIM_VERBOSE`.
pub fn init_tracing_for(cmds: &UserCommands) -> bool {
    init_tracing(Some(level_for(cmds)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("warn"), "simmetis=warn");
    }

    #[test]
    fn test_level_follows_sim_verbose() {
        let mut cmds = UserCommands::from_defaults_str("SIM_VERBOSE no\n").unwrap();
        assert_eq!(level_for(&cmds), DEFAULT_LEVEL);

        cmds.set("SIM_VERBOSE", true).unwrap();
        assert_eq!(level_for(&cmds), VERBOSE_LEVEL);
    }

    #[test]
    fn test_level_without_verbose_key() {
        let cmds = UserCommands::from_defaults_str("OBS_NDIT 1\n").unwrap();
        assert_eq!(level_for(&cmds), DEFAULT_LEVEL);
    }

    #[test]
    fn test_init_tracing_twice() {
        let _ = init_tracing(Some("warn"));
        assert!(!init_tracing(Some("warn")));
    }
}
