//! Environment variable names used by this crate for convenient
//! configuration of handlers from services.
//!
//! These are purely helpers; the core handler types remain decoupled
//! from environment access.

use crate::level::Level;

/// Minimum level for handlers built via `from_env`, e.g. `debug`.
pub const LEVEL_ENV: &str = "SPANLOG_LEVEL";

/// Optional logical service name stamped on every record.
pub const SERVICE_NAME_ENV: &str = "SPANLOG_SERVICE_NAME";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Minimum level from [`LEVEL_ENV`]; unset or unparseable values fall
/// back to [`Level::Info`].
pub fn level_from_env() -> Level {
    match std::env::var(LEVEL_ENV) {
        Ok(raw) => raw.parse().unwrap_or(Level::Info),
        Err(_) => Level::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_to_default() {
        assert_eq!(env_or("SPANLOG_TEST_UNSET_VAR", "fallback"), "fallback");

        std::env::set_var("SPANLOG_TEST_SET_VAR", "present");
        assert_eq!(env_or("SPANLOG_TEST_SET_VAR", "fallback"), "present");
        std::env::remove_var("SPANLOG_TEST_SET_VAR");
    }

    #[test]
    fn level_from_env_parses_and_defaults() {
        std::env::remove_var(LEVEL_ENV);
        assert_eq!(level_from_env(), Level::Info);

        std::env::set_var(LEVEL_ENV, "error");
        assert_eq!(level_from_env(), Level::Error);

        std::env::set_var(LEVEL_ENV, "not-a-level");
        assert_eq!(level_from_env(), Level::Info);
        std::env::remove_var(LEVEL_ENV);
    }
}
