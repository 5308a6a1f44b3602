//! Time units used when describing remaining time.

/// Time units for pluralized durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Seconds
    Second,
    /// Minutes
    Minute,
    /// Hours
    Hour,
    /// Days
    Day,
    /// 365-day years
    Year,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
            Self::Year => 31_536_000,
        }
    }

    /// Largest unit that fits at least once into `seconds` (seconds for anything below a minute).
    pub const fn largest_fitting(seconds: i64) -> Self {
        if seconds < Self::Minute.seconds() {
            Self::Second
        } else if seconds < Self::Hour.seconds() {
            Self::Minute
        } else if seconds < Self::Day.seconds() {
            Self::Hour
        } else if seconds < Self::Year.seconds() {
            Self::Day
        } else {
            Self::Year
        }
    }

    /// Get the message key for this time unit
    pub const fn message_id(self) -> &'static str {
        match self {
            Self::Second => "time-unit-second",
            Self::Minute => "time-unit-minute",
            Self::Hour => "time-unit-hour",
            Self::Day => "time-unit-day",
            Self::Year => "time-unit-year",
        }
    }
}
