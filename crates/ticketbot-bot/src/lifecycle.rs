//! Logging of cooldown lifecycle events and shutdown flushing.

use ticketbot_cooldown::{CooldownRegistry, EventKind};
use tracing::{error, info};

/// Log every `started`, `expired` and `deleted` event of `registry`.
///
/// Subscribe before [`CooldownRegistry::rehydrate`] so restored cooldowns
/// are logged too.
pub fn log_lifecycle(registry: &CooldownRegistry) {
    registry.subscribe(EventKind::Started, |event| {
        for record in event.records() {
            info!(key = %record.key, expires_at_ms = record.expires_at_ms, "Cooldown started");
        }
    });
    registry.subscribe(EventKind::Expired, |event| {
        for record in event.records() {
            info!(key = %record.key, "Cooldown expired");
        }
    });
    registry.subscribe(EventKind::Deleted, |event| {
        info!(count = event.records().len(), "Cooldowns deleted");
    });
}

/// Write pending snapshot changes, logging the outcome.
pub fn flush_cooldowns(registry: &CooldownRegistry) {
    match registry.flush() {
        Ok(()) => info!("Cooldown snapshot flushed"),
        Err(e) => error!("Failed to flush cooldown snapshot: {}", e),
    }
}
