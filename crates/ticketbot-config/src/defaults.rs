//! Default values for configuration sections.

use crate::schema::{CommandsConfig, CooldownConfig};
use std::path::PathBuf;
use ticketbot_cooldown::{CooldownDuration, MAX_TIMER_DELAY};
use ticketbot_i18n::Locale;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/cooldowns.json";

/// Default write-coalescing window.
pub const DEFAULT_FLUSH_DELAY_MS: u64 = 1_000;

/// Default `/ping` cooldown in seconds.
pub const DEFAULT_PING_COOLDOWN_SECS: i64 = 10;

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            snapshot_path: Some(PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
            flush_delay_ms: DEFAULT_FLUSH_DELAY_MS,
            max_timer_delay_ms: max_timer_delay_ms(),
            locale: Locale::default(),
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            ping_cooldown: CooldownDuration::seconds(DEFAULT_PING_COOLDOWN_SECS),
            persist_command_cooldowns: false,
        }
    }
}

/// Largest accepted `max_timer_delay_ms`.
pub fn max_timer_delay_ms() -> u64 {
    u64::try_from(MAX_TIMER_DELAY.as_millis()).unwrap_or(u64::MAX)
}
