//! Cooldown lengths expressed in calendar-free units.

use crate::error::{CooldownError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Longest cooldown the registry accepts: 10 years of 365.25 days.
pub const MAX_COOLDOWN_SECS: i64 = 315_576_000;

/// Longest single sleep a timer performs before re-checking the store.
pub const MAX_TIMER_DELAY: Duration = Duration::from_millis(2_147_483_500);

/// A cooldown length as a sum of units.
///
/// At least one field must be present. When `seconds` is given and non-zero
/// one extra second is added, so a "10 second" cooldown never reads as
/// expired inside the tenth second.
///
/// Deserializes from YAML/JSON maps such as `{ minutes: 5 }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CooldownDuration {
    /// Seconds component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
    /// Minutes component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    /// Hours component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    /// Days component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
}

impl CooldownDuration {
    /// Only seconds
    pub const fn seconds(seconds: i64) -> Self {
        Self {
            seconds: Some(seconds),
            minutes: None,
            hours: None,
            days: None,
        }
    }

    /// Only minutes
    pub const fn minutes(minutes: i64) -> Self {
        Self {
            seconds: None,
            minutes: Some(minutes),
            hours: None,
            days: None,
        }
    }

    /// Only hours
    pub const fn hours(hours: i64) -> Self {
        Self {
            seconds: None,
            minutes: None,
            hours: Some(hours),
            days: None,
        }
    }

    /// Only days
    pub const fn days(days: i64) -> Self {
        Self {
            seconds: None,
            minutes: None,
            hours: None,
            days: Some(days),
        }
    }

    /// Add a seconds component
    #[must_use]
    pub const fn with_seconds(mut self, seconds: i64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    /// Add a minutes component
    #[must_use]
    pub const fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = Some(minutes);
        self
    }

    /// Add an hours component
    #[must_use]
    pub const fn with_hours(mut self, hours: i64) -> Self {
        self.hours = Some(hours);
        self
    }

    /// True when no unit is present
    pub const fn is_empty(&self) -> bool {
        self.seconds.is_none()
            && self.minutes.is_none()
            && self.hours.is_none()
            && self.days.is_none()
    }

    /// Total length in seconds, clamped to `[0, MAX_COOLDOWN_SECS]`.
    pub fn total_seconds(&self) -> i64 {
        let seconds = match self.seconds {
            Some(s) if s != 0 => s.saturating_add(1),
            Some(s) => s,
            None => 0,
        };

        let total = [
            (self.minutes, 60),
            (self.hours, 3_600),
            (self.days, 86_400),
        ]
        .into_iter()
        .fold(seconds, |acc, (value, unit)| {
            acc.saturating_add(value.unwrap_or(0).saturating_mul(unit))
        });

        total.clamp(0, MAX_COOLDOWN_SECS)
    }

    /// Reject durations without any unit.
    pub fn validate(&self, function: &'static str) -> Result<()> {
        if self.is_empty() {
            return Err(CooldownError::Validation {
                function,
                param: "duration",
                received: self.to_string(),
                expected: "at least one of seconds, minutes, hours or days".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for CooldownDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [
            ("days", self.days),
            ("hours", self.hours),
            ("minutes", self.minutes),
            ("seconds", self.seconds),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| format!("{name}: {v}")))
        .collect();

        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seconds_bias() {
        assert_eq!(CooldownDuration::seconds(10).total_seconds(), 11);
        assert_eq!(CooldownDuration::seconds(0).total_seconds(), 0);
    }

    #[test]
    fn test_units_sum() {
        let duration = CooldownDuration::hours(1).with_minutes(30).with_seconds(5);
        assert_eq!(duration.total_seconds(), 3_600 + 1_800 + 6);
        assert_eq!(CooldownDuration::days(2).total_seconds(), 172_800);
    }

    #[test]
    fn test_clamped_to_ten_years() {
        assert_eq!(
            CooldownDuration::days(100_000).total_seconds(),
            MAX_COOLDOWN_SECS
        );
        assert_eq!(
            CooldownDuration::days(i64::MAX).total_seconds(),
            MAX_COOLDOWN_SECS
        );
        assert_eq!(CooldownDuration::minutes(-5).total_seconds(), 0);
    }

    #[test]
    fn test_empty_duration_rejected() {
        let err = CooldownDuration::default()
            .validate("set(key, duration)")
            .unwrap_err();
        assert!(matches!(
            err,
            CooldownError::Validation { param: "duration", .. }
        ));
        assert!(CooldownDuration::seconds(0).validate("set").is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(CooldownDuration::default().to_string(), "{}");
        assert_eq!(
            CooldownDuration::hours(1).with_seconds(5).to_string(),
            "{hours: 1, seconds: 5}"
        );
    }

    #[test]
    fn test_deserialize_partial_map() {
        let duration: CooldownDuration = serde_json::from_str(r#"{"minutes": 5}"#).unwrap();
        assert_eq!(duration, CooldownDuration::minutes(5));
        assert!(serde_json::from_str::<CooldownDuration>(r#"{"weeks": 1}"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_total_always_in_range(
            s in proptest::option::of(any::<i64>()),
            m in proptest::option::of(any::<i64>()),
            h in proptest::option::of(any::<i64>()),
            d in proptest::option::of(any::<i64>()),
        ) {
            let duration = CooldownDuration { seconds: s, minutes: m, hours: h, days: d };
            let total = duration.total_seconds();
            prop_assert!((0..=MAX_COOLDOWN_SECS).contains(&total));
        }
    }
}
