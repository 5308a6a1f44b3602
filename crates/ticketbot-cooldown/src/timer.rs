//! Per-key expiry timers.
//!
//! Each armed key owns one spawned Tokio task. A task sleeps for at most the
//! configured maximum delay, then asks its `residual` callback how much time
//! is left; it keeps sleeping while time remains and runs `on_fire` once it
//! does not. Arming a key aborts the task previously armed for it.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Identifies one arming of a key.
pub type TimerId = u64;

#[derive(Debug)]
struct ArmedTimer {
    id: TimerId,
    handle: JoinHandle<()>,
}

/// Registry of at most one expiry task per key.
#[derive(Debug)]
pub struct TimerScheduler {
    timers: Mutex<HashMap<String, ArmedTimer>>,
    max_delay: Duration,
    next_id: AtomicU64,
    rearms: Arc<AtomicU64>,
}

impl TimerScheduler {
    /// Create a scheduler whose tasks never sleep longer than `max_delay`.
    pub fn new(max_delay: Duration) -> Self {
        Self {
            timers: Mutex::new(HashMap::new()),
            max_delay: max_delay.max(Duration::from_millis(1)),
            next_id: AtomicU64::new(1),
            rearms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Arm `key` to fire after `delay`, replacing any timer already armed for it.
    ///
    /// `residual` is polled after every sleep; `Some` non-zero duration means
    /// the deadline moved or has not been reached and the task sleeps again.
    /// `on_fire` receives the id returned here, which the callee should hand
    /// back to [`release`](Self::release).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn arm<R, F>(&self, key: &str, delay: Duration, residual: R, on_fire: F) -> TimerId
    where
        R: Fn() -> Option<Duration> + Send + 'static,
        F: FnOnce(TimerId) + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let max_delay = self.max_delay;
        let rearms = Arc::clone(&self.rearms);
        let task_key = key.to_string();

        let mut timers = self.timers.lock();
        if let Some(previous) = timers.remove(key) {
            trace!(key, timer_id = previous.id, "Replacing armed timer");
            previous.handle.abort();
        }

        let handle = tokio::spawn(async move {
            let mut wait = delay;
            loop {
                tokio::time::sleep(wait.min(max_delay)).await;
                match residual() {
                    Some(rest) if !rest.is_zero() => {
                        rearms.fetch_add(1, Ordering::Relaxed);
                        debug!(
                            key = %task_key,
                            remaining_ms = rest.as_millis(),
                            "Re-arming cooldown timer"
                        );
                        wait = rest;
                    }
                    _ => break,
                }
            }
            on_fire(id);
        });

        timers.insert(key.to_string(), ArmedTimer { id, handle });
        id
    }

    /// Abort the timer armed for `key`. Returns whether one existed.
    pub fn cancel(&self, key: &str) -> bool {
        self.timers.lock().remove(key).is_some_and(|timer| {
            timer.handle.abort();
            true
        })
    }

    /// Abort every timer. Returns how many were armed.
    pub fn cancel_all(&self) -> usize {
        let mut timers = self.timers.lock();
        let count = timers.len();
        for (_, timer) in timers.drain() {
            timer.handle.abort();
        }
        count
    }

    /// Forget the timer for `key` if it is still the arming identified by `id`.
    ///
    /// Called by a firing task: `false` means the key was re-armed or
    /// cancelled meanwhile and the firing is stale.
    pub fn release(&self, key: &str, id: TimerId) -> bool {
        let mut timers = self.timers.lock();
        if timers.get(key).is_some_and(|timer| timer.id == id) {
            timers.remove(key);
            true
        } else {
            false
        }
    }

    /// Whether a timer is armed for `key`
    pub fn is_armed(&self, key: &str) -> bool {
        self.timers.lock().contains_key(key)
    }

    /// Number of armed timers
    pub fn armed_count(&self) -> usize {
        self.timers.lock().len()
    }

    /// How many times a task went back to sleep instead of firing
    pub fn rearm_count(&self) -> u64 {
        self.rearms.load(Ordering::Relaxed)
    }

    /// Longest single sleep
    pub const fn max_delay(&self) -> Duration {
        self.max_delay
    }
}

impl Drop for TimerScheduler {
    fn drop(&mut self) {
        for (_, timer) in self.timers.get_mut().drain() {
            timer.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::oneshot;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let scheduler = TimerScheduler::new(Duration::from_secs(60));
        let (tx, rx) = oneshot::channel();

        let id = scheduler.arm("k", Duration::from_secs(5), || None, move |fired| {
            let _ = tx.send(fired);
        });

        assert!(scheduler.is_armed("k"));
        assert_eq!(rx.await.unwrap(), id);
        assert!(scheduler.release("k", id));
        assert!(!scheduler.is_armed("k"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_previous() {
        let scheduler = TimerScheduler::new(Duration::from_secs(60));
        let fired = Arc::new(AtomicUsize::new(0));

        let first = Arc::clone(&fired);
        let old = scheduler.arm("k", Duration::from_secs(1), || None, move |_| {
            first.fetch_add(1, Ordering::SeqCst);
        });
        let second = Arc::clone(&fired);
        let new = scheduler.arm("k", Duration::from_secs(2), || None, move |_| {
            second.fetch_add(10, Ordering::SeqCst);
        });

        assert_ne!(old, new);
        assert_eq!(scheduler.armed_count(), 1);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 10);
        assert!(!scheduler.release("k", old));
        assert!(scheduler.release("k", new));
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_delay_is_chained() {
        let scheduler = TimerScheduler::new(Duration::from_millis(100));
        let deadline = tokio::time::Instant::now() + Duration::from_millis(350);
        let (tx, rx) = oneshot::channel();

        scheduler.arm(
            "long",
            Duration::from_millis(350),
            move || {
                let rest = deadline.saturating_duration_since(tokio::time::Instant::now());
                (!rest.is_zero()).then_some(rest)
            },
            move |_| {
                let _ = tx.send(tokio::time::Instant::now());
            },
        );

        let fired_at = rx.await.unwrap();
        assert!(fired_at >= deadline);
        assert_eq!(scheduler.rearm_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let scheduler = TimerScheduler::new(Duration::from_secs(60));
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);

        scheduler.arm("k", Duration::from_secs(1), || None, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(scheduler.cancel("k"));
        assert!(!scheduler.cancel("k"));
        assert_eq!(scheduler.cancel_all(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
