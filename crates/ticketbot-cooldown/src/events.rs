//! Cooldown lifecycle notifications.
//!
//! Listeners never run inside the registry call that produced the event:
//! events are queued to a dispatcher task and delivered there, one at a
//! time, in publication order.

use crate::error::CooldownError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{trace, warn};

/// Event categories listeners subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A cooldown was set or restored from the snapshot
    Started,
    /// A cooldown ran out
    Expired,
    /// Cooldowns were removed before running out
    Deleted,
}

impl EventKind {
    /// Every kind
    pub const ALL: [Self; 3] = [Self::Started, Self::Expired, Self::Deleted];

    /// Lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Expired => "expired",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = CooldownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CooldownError::Configuration {
                param: "event",
                received: format!("{s:?}"),
                expected: "'started' | 'expired' | 'deleted'".to_string(),
            })
    }
}

/// One cooldown as carried by events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownRecord {
    /// Cooldown key
    pub key: String,
    /// Expiry in Unix milliseconds
    pub expires_at_ms: i64,
}

impl CooldownRecord {
    /// Record for `key` expiring at `expires_at` Unix seconds
    pub fn from_seconds(key: impl Into<String>, expires_at: i64) -> Self {
        Self {
            key: key.into(),
            expires_at_ms: expires_at.saturating_mul(1000),
        }
    }
}

/// A lifecycle event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "cooldowns", rename_all = "lowercase")]
pub enum CooldownEvent {
    /// Cooldown set or restored
    Started(CooldownRecord),
    /// Cooldown ran out
    Expired(CooldownRecord),
    /// Cooldowns removed by `remove` or `remove_all`
    Deleted(Vec<CooldownRecord>),
}

impl CooldownEvent {
    /// Category of this event
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Started(_) => EventKind::Started,
            Self::Expired(_) => EventKind::Expired,
            Self::Deleted(_) => EventKind::Deleted,
        }
    }

    /// Affected cooldowns
    pub fn records(&self) -> &[CooldownRecord] {
        match self {
            Self::Started(record) | Self::Expired(record) => std::slice::from_ref(record),
            Self::Deleted(records) => records,
        }
    }
}

type Listener = Arc<dyn Fn(&CooldownEvent) + Send + Sync>;
type Listeners = Arc<RwLock<HashMap<EventKind, Vec<Listener>>>>;

/// Subscriber registry plus the dispatcher feeding it.
pub struct EventNotifier {
    listeners: Listeners,
    sender: mpsc::UnboundedSender<CooldownEvent>,
}

impl fmt::Debug for EventNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventNotifier")
            .field("subscribers", &self.count_subscribers(None))
            .finish_non_exhaustive()
    }
}

impl EventNotifier {
    /// Create a notifier and spawn its dispatcher. Requires a Tokio runtime.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let listeners = Listeners::default();
        tokio::spawn(dispatch(receiver, Arc::clone(&listeners)));
        Self { listeners, sender }
    }

    /// Register `listener` for events of `kind`
    pub fn subscribe<F>(&self, kind: EventKind, listener: F)
    where
        F: Fn(&CooldownEvent) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .entry(kind)
            .or_default()
            .push(Arc::new(listener));
    }

    /// Queue `event` for delivery. Dropped when nobody listens for its kind.
    pub fn publish(&self, event: CooldownEvent) {
        if self.count_subscribers(Some(event.kind())) == 0 {
            trace!(kind = %event.kind(), "No subscribers, event dropped");
            return;
        }
        if self.sender.send(event).is_err() {
            warn!("Cooldown event dispatcher has stopped");
        }
    }

    /// Listener count for one kind, or across all kinds
    pub fn count_subscribers(&self, kind: Option<EventKind>) -> usize {
        let listeners = self.listeners.read();
        match kind {
            Some(kind) => listeners.get(&kind).map_or(0, Vec::len),
            None => listeners.values().map(Vec::len).sum(),
        }
    }
}

impl Default for EventNotifier {
    fn default() -> Self {
        Self::new()
    }
}

async fn dispatch(mut receiver: mpsc::UnboundedReceiver<CooldownEvent>, listeners: Listeners) {
    while let Some(event) = receiver.recv().await {
        let targets: Vec<Listener> = listeners
            .read()
            .get(&event.kind())
            .cloned()
            .unwrap_or_default();

        trace!(kind = %event.kind(), listeners = targets.len(), "Dispatching cooldown event");
        for listener in &targets {
            listener(&event);
        }
    }
}
