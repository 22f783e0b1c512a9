// listguard/src/logger.rs
//! Logger setup for the listguard CLI.
//!
//! `RUST_LOG` is honored unless the caller forces a level (e.g. `--debug`
//! or `--quiet`). Initialization is idempotent so tests can call it freely.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`, defaulting to `warn` when `RUST_LOG` is unset.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    // Already initialized by an earlier call; keep the first configuration.
    let _ = builder.try_init();
}

/// Maps the global CLI flags to a level override. `--quiet` wins over `--debug`.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }

    #[test]
    fn test_init_logger_twice_is_harmless() {
        init_logger(Some(LevelFilter::Debug));
        init_logger(None);
        log::debug!("logger initialized twice without panicking");
    }
}
