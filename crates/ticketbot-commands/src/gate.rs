//! Registry checks shared by commands, independent of Discord.

use crate::framework::Error;
use ticketbot_common::{command_cooldown_key, UserId};
use ticketbot_cooldown::{CooldownDuration, CooldownRegistry, LeftFormat};
use ticketbot_i18n::{FluentArgs, Messages};

/// Name under which `/ping` cooldowns are keyed.
pub const PING_COMMAND: &str = "ping";

/// Registry key of a member's `/ping` cooldown.
pub fn ping_key(user: UserId) -> String {
    command_cooldown_key(PING_COMMAND, user)
}

/// Outcome of [`enter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// The command may run; its cooldown has been started.
    Open,
    /// The command is cooling down.
    Cooling {
        /// Remaining time as localized text
        left: String,
        /// Relative timestamp markup of the expiry
        timestamp: String,
    },
}

/// Let a command through and start its cooldown, or report the time left.
pub fn enter(
    registry: &CooldownRegistry,
    key: &str,
    duration: CooldownDuration,
    persist: bool,
) -> ticketbot_cooldown::Result<Gate> {
    if registry.has(key)? {
        return Ok(Gate::Cooling {
            left: registry.left(key, LeftFormat::Text)?,
            timestamp: registry.left(key, LeftFormat::Timestamp)?,
        });
    }

    registry.set(key, duration, persist)?;
    Ok(Gate::Open)
}

/// Status line for the cooldown at `key` of the member mentioned as `user`.
pub fn status_message(
    registry: &CooldownRegistry,
    messages: &Messages,
    user: &str,
    key: &str,
) -> Result<String, Error> {
    let locale = registry.locale();
    let text = if registry.has(key)? {
        messages.format_with(
            locale,
            "cooldown-status-active",
            &[
                ("user", user.to_string()),
                ("digital", registry.left(key, LeftFormat::Digital)?),
                ("timestamp", registry.left(key, LeftFormat::Timestamp)?),
            ],
        )?
    } else {
        messages.format_with(locale, "cooldown-status-idle", &[("user", user.to_string())])?
    };
    Ok(text)
}

/// Remove the cooldown at `key` and describe the result.
pub fn reset_message(
    registry: &CooldownRegistry,
    messages: &Messages,
    user: &str,
    key: &str,
) -> Result<String, Error> {
    let id = if registry.remove(key)?.is_empty() {
        "cooldown-reset-missing"
    } else {
        "cooldown-reset-done"
    };
    Ok(messages.format_with(registry.locale(), id, &[("user", user.to_string())])?)
}

/// Remove every cooldown and describe the result.
pub fn clear_message(registry: &CooldownRegistry, messages: &Messages) -> Result<String, Error> {
    let removed = registry.remove_all();
    let mut args = FluentArgs::new();
    args.set("count", i64::try_from(removed.len()).unwrap_or(i64::MAX));
    Ok(messages.format(registry.locale(), "cooldown-clear-done", Some(&args))?)
}
