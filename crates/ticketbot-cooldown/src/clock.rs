//! Wall-clock sources.

use chrono::Utc;
use std::fmt;

/// Source of the current Unix time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;

    /// Whole seconds since the Unix epoch
    fn now_seconds(&self) -> i64 {
        self.now_millis().div_euclid(1000)
    }
}

/// System wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that advances with Tokio's timer.
///
/// Anchored to a Unix time at construction and moved forward by
/// [`tokio::time::Instant`], so it follows `tokio::time::pause`/`advance`
/// in tests together with the registry's timers.
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin_millis: i64,
    origin: tokio::time::Instant,
}

impl TokioClock {
    /// Anchor at the current system time
    pub fn new() -> Self {
        Self::starting_at(Utc::now().timestamp_millis())
    }

    /// Anchor at a fixed Unix time in milliseconds
    pub fn starting_at(unix_millis: i64) -> Self {
        Self {
            origin_millis: unix_millis,
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now_millis(&self) -> i64 {
        let elapsed = i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.origin_millis.saturating_add(elapsed)
    }
}
