//! Test utilities and shared test helpers for ticketbot.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another harness may already have installed a global subscriber.
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    use crate::{GuildId, UserId};

    /// Create a test guild ID.
    pub fn test_guild_id() -> GuildId {
        GuildId(123_456_789_012_345_678)
    }

    /// Create a test user ID.
    pub fn test_user_id() -> UserId {
        UserId(545_154_148_069_408_768)
    }

    /// Create multiple test user IDs.
    pub fn test_user_ids(count: usize) -> Vec<UserId> {
        (0..count as u64)
            .map(|i| UserId(100_000_000_000_000_000 + i))
            .collect()
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
discord:
  token: "test_token"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "discord:\n",
            "  token: \"test_token_full\"\n",
            "  guild_id: 123456789012345678\n",
            "\n",
            "cooldown:\n",
            "  snapshot_path: \"data/cooldowns.json\"\n",
            "  flush_delay_ms: 500\n",
            "  max_timer_delay_ms: 2147483500\n",
            "  locale: \"en-US\"\n",
            "\n",
            "commands:\n",
            "  ping_cooldown:\n",
            "    seconds: 10\n",
            "  persist_command_cooldowns: true\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"compact\"\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        // Should not panic when called multiple times
        init_test_logging();
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_user_id_fixtures_are_distinct() {
        let ids = discord_fixtures::test_user_ids(3);
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }
}
