//! In-memory map of active cooldowns.

use std::collections::HashMap;

/// `key -> expiry` map, expiry in Unix seconds.
///
/// Holds no timing logic: whether an entry is still active is decided by the
/// caller against its clock.
#[derive(Debug, Default, Clone)]
pub struct CooldownStore {
    entries: HashMap<String, i64>,
}

impl CooldownStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry
    pub fn set(&mut self, key: &str, expires_at: i64) {
        self.entries.insert(key.to_string(), expires_at);
    }

    /// Expiry of `key`, if present
    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries.get(key).copied()
    }

    /// Remove `key`, returning its expiry
    pub fn delete(&mut self, key: &str) -> Option<i64> {
        self.entries.remove(key)
    }

    /// Remove everything, returning the removed entries sorted by key
    pub fn drain(&mut self) -> Vec<(String, i64)> {
        let mut entries: Vec<_> = self.entries.drain().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Snapshot of all entries sorted by key
    pub fn entries(&self) -> Vec<(String, i64)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, expiry)| (key.clone(), *expiry))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
