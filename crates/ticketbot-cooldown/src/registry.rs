//! The cooldown registry facade.

use crate::clock::{Clock, SystemClock};
use crate::duration::{CooldownDuration, MAX_TIMER_DELAY};
use crate::error::{CooldownError, PersistenceError, Result};
use crate::events::{CooldownEvent, CooldownRecord, EventKind, EventNotifier};
use crate::format::{LeftFormat, RemainingFormatter};
use crate::snapshot::SnapshotStore;
use crate::store::CooldownStore;
use crate::timer::{TimerId, TimerScheduler};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use ticketbot_i18n::{Locale, Messages};
use tracing::{debug, info, warn};

/// Characters a key may not contain.
pub const RESERVED_CHARACTERS: &[char] = &['\'', '\\'];

/// Registry construction settings
#[derive(Debug, Clone)]
pub struct CooldownSettings {
    /// Snapshot file; `None` disables persistence
    pub snapshot_path: Option<PathBuf>,
    /// Delay between the first buffered snapshot change and its write
    pub flush_delay: Duration,
    /// Longest single timer sleep
    pub max_timer_delay: Duration,
    /// Locale for text renderings
    pub locale: Locale,
}

impl Default for CooldownSettings {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            flush_delay: Duration::from_secs(1),
            max_timer_delay: MAX_TIMER_DELAY,
            locale: Locale::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Persistence {
    Write,
    AlreadyPersisted,
    Volatile,
}

#[derive(Debug, Default)]
struct RegistryState {
    store: CooldownStore,
    persisted: HashSet<String>,
}

struct RegistryInner {
    state: Mutex<RegistryState>,
    timers: TimerScheduler,
    snapshot: Option<SnapshotStore>,
    notifier: EventNotifier,
    clock: Arc<dyn Clock>,
    formatter: RemainingFormatter,
}

/// Registry of expiring keys.
///
/// Cheap to clone; all clones share state. Must be created inside a Tokio
/// runtime since timers, snapshot flushes and event delivery run as tasks.
///
/// Lock order is registry state, then timers. Timer tasks only ever take the
/// state lock from outside the timer lock.
#[derive(Clone)]
pub struct CooldownRegistry {
    inner: Arc<RegistryInner>,
}

impl fmt::Debug for CooldownRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CooldownRegistry")
            .field("active", &self.len())
            .field("armed_timers", &self.inner.timers.armed_count())
            .field("snapshot", &self.inner.snapshot.as_ref().map(SnapshotStore::path))
            .finish_non_exhaustive()
    }
}

impl CooldownRegistry {
    /// Registry on the system clock.
    pub fn new(settings: CooldownSettings, messages: Arc<Messages>) -> Self {
        Self::with_clock(settings, messages, Arc::new(SystemClock))
    }

    /// Registry on a custom clock.
    pub fn with_clock(
        settings: CooldownSettings,
        messages: Arc<Messages>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let snapshot = settings
            .snapshot_path
            .map(|path| SnapshotStore::new(path, settings.flush_delay));

        debug!(
            persistence = snapshot.is_some(),
            locale = %settings.locale,
            max_timer_delay_ms = settings.max_timer_delay.as_millis(),
            "Creating cooldown registry"
        );

        Self {
            inner: Arc::new(RegistryInner {
                state: Mutex::new(RegistryState::default()),
                timers: TimerScheduler::new(settings.max_timer_delay),
                snapshot,
                notifier: EventNotifier::new(),
                clock,
                formatter: RemainingFormatter::new(messages, settings.locale),
            }),
        }
    }

    /// Start or restart the cooldown of `key`.
    ///
    /// A duration totalling zero seconds is accepted and ignored. With
    /// `persist` the cooldown is written to the snapshot; without it any
    /// earlier persisted entry for `key` is removed from the snapshot.
    pub fn set(&self, key: &str, duration: CooldownDuration, persist: bool) -> Result<()> {
        const FUNCTION: &str = "set(key, duration, persist)";
        validate_key(FUNCTION, key)?;
        duration.validate(FUNCTION)?;

        let seconds = duration.total_seconds();
        if seconds == 0 {
            debug!(key, "Ignoring zero-length cooldown");
            return Ok(());
        }

        let expires_at = self.inner.clock.now_seconds().saturating_add(seconds);
        let persistence = if persist {
            Persistence::Write
        } else {
            Persistence::Volatile
        };

        start(
            &self.inner,
            key,
            expires_at,
            Duration::from_secs(seconds.unsigned_abs()),
            persistence,
        );
        Ok(())
    }

    /// Expiry of `key` in Unix milliseconds, if stored.
    ///
    /// An entry whose expiry has passed but whose timer has not fired yet is
    /// still returned; use [`has`](Self::has) for the active check.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.inner
            .state
            .lock()
            .store
            .get(key)
            .map(|expires_at| expires_at.saturating_mul(1000))
    }

    /// Every stored cooldown, sorted by key
    pub fn get_all(&self) -> Vec<CooldownRecord> {
        self.inner
            .state
            .lock()
            .store
            .entries()
            .into_iter()
            .map(|(key, expires_at)| CooldownRecord::from_seconds(key, expires_at))
            .collect()
    }

    /// Whether `key` has a cooldown that has not run out
    pub fn has(&self, key: &str) -> Result<bool> {
        validate_key("has(key)", key)?;
        let now_ms = self.inner.clock.now_millis();
        Ok(self.get(key).is_some_and(|expires_at_ms| expires_at_ms > now_ms))
    }

    /// Time left on `key` rendered as `format`.
    pub fn left(&self, key: &str, format: LeftFormat) -> Result<String> {
        validate_key("left(key, format)", key)?;
        let expires_at_ms = self.get(key);
        self.inner
            .formatter
            .render(format, expires_at_ms, self.inner.clock.now_millis())
    }

    /// Cancel the cooldown of `key`, returning what was removed.
    pub fn remove(&self, key: &str) -> Result<Vec<CooldownRecord>> {
        validate_key("remove(key)", key)?;
        let inner = &self.inner;

        let mut state = inner.state.lock();
        let Some(expires_at) = state.store.delete(key) else {
            return Ok(Vec::new());
        };
        inner.timers.cancel(key);
        if state.persisted.remove(key) {
            if let Some(snapshot) = &inner.snapshot {
                snapshot.remove(key);
            }
        }

        let removed = vec![CooldownRecord::from_seconds(key, expires_at)];
        inner.notifier.publish(CooldownEvent::Deleted(removed.clone()));
        drop(state);

        debug!(key, "Cooldown removed");
        Ok(removed)
    }

    /// Cancel every cooldown, returning what was removed.
    pub fn remove_all(&self) -> Vec<CooldownRecord> {
        let inner = &self.inner;

        let mut state = inner.state.lock();
        if state.store.is_empty() {
            return Vec::new();
        }

        let removed: Vec<CooldownRecord> = state
            .store
            .drain()
            .into_iter()
            .map(|(key, expires_at)| CooldownRecord::from_seconds(key, expires_at))
            .collect();
        inner.timers.cancel_all();
        state.persisted.clear();
        if let Some(snapshot) = &inner.snapshot {
            snapshot.remove_all();
        }

        inner.notifier.publish(CooldownEvent::Deleted(removed.clone()));
        drop(state);

        info!(count = removed.len(), "All cooldowns removed");
        removed
    }

    /// Restore persisted cooldowns from the snapshot.
    ///
    /// Entries still in the future are stored, armed and announced as
    /// `started` without being written again. Entries that ran out while the
    /// process was down are dropped from the snapshot and announced as
    /// `expired`. Returns the number of restored cooldowns.
    pub fn rehydrate(&self) -> usize {
        let Some(snapshot) = &self.inner.snapshot else {
            return 0;
        };

        let entries = snapshot.load_all();
        if entries.is_empty() {
            return 0;
        }

        let now_ms = self.inner.clock.now_millis();
        let mut restored = 0;
        let mut stale = 0;

        for (key, expires_at) in entries {
            if let Err(e) = validate_key("rehydrate()", &key) {
                warn!("Dropping unusable snapshot entry: {}", e);
                snapshot.remove(&key);
                continue;
            }

            let remaining_ms = expires_at.saturating_mul(1000).saturating_sub(now_ms);
            if remaining_ms <= 0 {
                snapshot.remove(&key);
                self.inner
                    .notifier
                    .publish(CooldownEvent::Expired(CooldownRecord::from_seconds(key, expires_at)));
                stale += 1;
                continue;
            }

            start(
                &self.inner,
                &key,
                expires_at,
                Duration::from_millis(remaining_ms.unsigned_abs()),
                Persistence::AlreadyPersisted,
            );
            restored += 1;
        }

        info!(restored, stale, "Rehydrated persisted cooldowns");
        restored
    }

    /// Write buffered snapshot changes now.
    pub fn flush(&self) -> std::result::Result<(), PersistenceError> {
        self.inner
            .snapshot
            .as_ref()
            .map_or(Ok(()), SnapshotStore::flush)
    }

    /// Register a listener for events of `kind`
    pub fn subscribe<F>(&self, kind: EventKind, listener: F)
    where
        F: Fn(&CooldownEvent) + Send + Sync + 'static,
    {
        self.inner.notifier.subscribe(kind, listener);
    }

    /// Listener count for `kind`, or across all kinds
    pub fn count_subscribers(&self, kind: Option<EventKind>) -> usize {
        self.inner.notifier.count_subscribers(kind)
    }

    /// Number of stored cooldowns
    pub fn len(&self) -> usize {
        self.inner.state.lock().store.len()
    }

    /// True when no cooldown is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of timer re-arms caused by cooldowns longer than the maximum delay
    pub fn rearm_count(&self) -> u64 {
        self.inner.timers.rearm_count()
    }

    /// Locale used by [`left`](Self::left) text renderings
    pub fn locale(&self) -> Locale {
        self.inner.formatter.locale()
    }
}

fn validate_key(function: &'static str, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CooldownError::Validation {
            function,
            param: "key",
            received: "\"\"".to_string(),
            expected: "a non-empty string".to_string(),
        });
    }
    if key.contains(RESERVED_CHARACTERS) {
        return Err(CooldownError::ReservedCharacter {
            function,
            param: "key",
            received: format!("{key:?}"),
            reserved: RESERVED_CHARACTERS,
        });
    }
    Ok(())
}

fn start(
    inner: &Arc<RegistryInner>,
    key: &str,
    expires_at: i64,
    delay: Duration,
    persistence: Persistence,
) {
    let mut state = inner.state.lock();
    state.store.set(key, expires_at);

    match (persistence, &inner.snapshot) {
        (Persistence::Write, Some(snapshot)) => {
            state.persisted.insert(key.to_string());
            snapshot.write(key, expires_at);
        }
        (Persistence::Write, None) => {
            debug!(key, "Persistence requested but no snapshot is configured");
        }
        (Persistence::AlreadyPersisted, _) => {
            state.persisted.insert(key.to_string());
        }
        (Persistence::Volatile, snapshot) => {
            if state.persisted.remove(key) {
                if let Some(snapshot) = snapshot {
                    snapshot.remove(key);
                }
            }
        }
    }

    arm(inner, key, delay);
    inner
        .notifier
        .publish(CooldownEvent::Started(CooldownRecord::from_seconds(key, expires_at)));
    drop(state);

    debug!(key, expires_at, "Cooldown started");
}

fn arm(inner: &Arc<RegistryInner>, key: &str, delay: Duration) {
    let for_residual = Arc::downgrade(inner);
    let for_fire = Arc::downgrade(inner);
    let residual_key = key.to_string();
    let fire_key = key.to_string();

    inner.timers.arm(
        key,
        delay,
        move || for_residual.upgrade().and_then(|inner| inner.remaining(&residual_key)),
        move |timer_id| {
            if let Some(inner) = for_fire.upgrade() {
                expire(&inner, &fire_key, timer_id);
            }
        },
    );
}

fn expire(inner: &Arc<RegistryInner>, key: &str, timer_id: TimerId) {
    let mut state = inner.state.lock();
    if !inner.timers.release(key, timer_id) {
        return;
    }

    let Some(expires_at) = state.store.get(key) else {
        return;
    };

    let remaining_ms = expires_at
        .saturating_mul(1000)
        .saturating_sub(inner.clock.now_millis());
    if remaining_ms > 0 {
        arm(inner, key, Duration::from_millis(remaining_ms.unsigned_abs()));
        return;
    }

    state.store.delete(key);
    if state.persisted.remove(key) {
        if let Some(snapshot) = &inner.snapshot {
            snapshot.remove(key);
        }
    }

    inner
        .notifier
        .publish(CooldownEvent::Expired(CooldownRecord::from_seconds(key, expires_at)));
    drop(state);

    debug!(key, "Cooldown expired");
}

impl RegistryInner {
    fn remaining(&self, key: &str) -> Option<Duration> {
        let expires_at = self.state.lock().store.get(key)?;
        let remaining_ms = expires_at
            .saturating_mul(1000)
            .saturating_sub(self.clock.now_millis());
        (remaining_ms > 0).then(|| Duration::from_millis(remaining_ms.unsigned_abs()))
    }
}
