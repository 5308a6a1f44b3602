//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use ticketbot_common::{GuildId, LoggingConfig};
use ticketbot_cooldown::{CooldownDuration, CooldownSettings};
use ticketbot_i18n::Locale;

/// Main configuration structure for ticketbot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Cooldown registry configuration.
    pub cooldown: CooldownConfig,
    /// Command behaviour.
    pub commands: CommandsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Discord bot configuration.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Register commands in this guild only instead of globally.
    pub guild_id: Option<GuildId>,
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

/// Cooldown registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConfig {
    /// Snapshot file for persisted cooldowns; `null` disables persistence.
    pub snapshot_path: Option<PathBuf>,
    /// Write-coalescing window of the snapshot in milliseconds.
    pub flush_delay_ms: u64,
    /// Longest single timer sleep in milliseconds.
    pub max_timer_delay_ms: u64,
    /// Locale of remaining-time text and command replies.
    pub locale: Locale,
}

impl CooldownConfig {
    /// Registry settings described by this section.
    pub fn settings(&self) -> CooldownSettings {
        CooldownSettings {
            snapshot_path: self.snapshot_path.clone(),
            flush_delay: Duration::from_millis(self.flush_delay_ms),
            max_timer_delay: Duration::from_millis(self.max_timer_delay_ms),
            locale: self.locale,
        }
    }
}

/// Command configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Per-user cooldown of `/ping`.
    pub ping_cooldown: CooldownDuration,
    /// Whether command cooldowns survive restarts.
    pub persist_command_cooldowns: bool,
}
