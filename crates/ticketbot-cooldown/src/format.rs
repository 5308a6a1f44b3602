//! Rendering of remaining cooldown time.

use crate::error::{CooldownError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use ticketbot_common::relative_timestamp;
use ticketbot_i18n::{Locale, Messages, TimeUnit};

/// Rendering requested from [`CooldownRegistry::left`](crate::CooldownRegistry::left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftFormat {
    /// Discord relative timestamp markup, `<t:1700000011:R>`
    Timestamp,
    /// Zero-padded clock, `01:02:03`
    Digital,
    /// Localized prose, `5 seconds`
    #[default]
    Text,
}

impl LeftFormat {
    /// Lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Digital => "digital",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for LeftFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeftFormat {
    type Err = CooldownError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "timestamp" => Ok(Self::Timestamp),
            "digital" => Ok(Self::Digital),
            "text" => Ok(Self::Text),
            other => Err(CooldownError::Validation {
                function: "left(key, format)",
                param: "format",
                received: format!("{other:?}"),
                expected: "'timestamp' | 'digital' | 'text'".to_string(),
            }),
        }
    }
}

/// Digital rendering of a cooldown that is not running.
pub const AVAILABLE_DIGITAL: &str = "00:00 <";

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// `MM:SS` below an hour, then `HH:MM:SS`, `DD:HH:MM:SS` and `YY:DD:HH:MM:SS`.
pub fn digital(remaining_ms: i64) -> String {
    let seconds = (remaining_ms / SECOND_MS) % 60;
    let minutes = (remaining_ms / MINUTE_MS) % 60;
    let hours = (remaining_ms / HOUR_MS) % 24;
    let days = (remaining_ms / DAY_MS) % 365;
    let years = remaining_ms / YEAR_MS;

    if remaining_ms < HOUR_MS {
        format!("{minutes:02}:{seconds:02}")
    } else if remaining_ms < DAY_MS {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else if remaining_ms < YEAR_MS {
        format!("{days:02}:{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{years:02}:{days:02}:{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Renders remaining time in one locale.
#[derive(Debug, Clone)]
pub struct RemainingFormatter {
    messages: Arc<Messages>,
    locale: Locale,
}

impl RemainingFormatter {
    /// Formatter for `locale`
    pub const fn new(messages: Arc<Messages>, locale: Locale) -> Self {
        Self { messages, locale }
    }

    /// Locale used for text renderings
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Render a cooldown expiring at `expires_at_ms`, or the "available"
    /// rendering when it is absent or not in the future.
    pub fn render(&self, format: LeftFormat, expires_at_ms: Option<i64>, now_ms: i64) -> Result<String> {
        let Some(expires_at_ms) = expires_at_ms.filter(|&expiry| expiry > now_ms) else {
            return self.available(format, now_ms);
        };

        match format {
            LeftFormat::Timestamp => Ok(relative_timestamp(expires_at_ms / 1000)),
            LeftFormat::Digital => Ok(digital(expires_at_ms - now_ms)),
            LeftFormat::Text => self.text((expires_at_ms - now_ms) / 1000, now_ms),
        }
    }

    fn text(&self, remaining_secs: i64, now_ms: i64) -> Result<String> {
        let unit = TimeUnit::largest_fitting(remaining_secs);
        let count = remaining_secs / unit.seconds();
        if count <= 0 {
            return self.available(LeftFormat::Text, now_ms);
        }
        Ok(self.messages.time_unit(self.locale, unit, count)?)
    }

    fn available(&self, format: LeftFormat, now_ms: i64) -> Result<String> {
        match format {
            LeftFormat::Timestamp => Ok(relative_timestamp(now_ms / 1000)),
            LeftFormat::Digital => Ok(AVAILABLE_DIGITAL.to_string()),
            LeftFormat::Text => Ok(self
                .messages
                .format(self.locale, "cooldown-available", None)?),
        }
    }
}
