//! Integration tests for the cooldown registry lifecycle.
//!
//! All tests run on paused Tokio time with a clock anchored to a fixed Unix
//! time, so expiries are exact.

use std::sync::Arc;
use std::time::Duration;
use ticketbot_common::test_utils::init_test_logging;
use ticketbot_cooldown::{
    CooldownDuration, CooldownEvent, CooldownRegistry, CooldownSettings, EventKind, LeftFormat,
    TokioClock,
};
use ticketbot_i18n::{Locale, Messages};
use tokio::sync::mpsc;

const START_MS: i64 = 1_700_000_000_000;

fn registry_with(settings: CooldownSettings) -> CooldownRegistry {
    init_test_logging();
    CooldownRegistry::with_clock(
        settings,
        Arc::new(Messages::load().unwrap()),
        Arc::new(TokioClock::starting_at(START_MS)),
    )
}

fn registry() -> CooldownRegistry {
    registry_with(CooldownSettings {
        locale: Locale::English,
        ..CooldownSettings::default()
    })
}

fn forward(registry: &CooldownRegistry, kind: EventKind) -> mpsc::UnboundedReceiver<CooldownEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    registry.subscribe(kind, move |event| {
        let _ = tx.send(event.clone());
    });
    rx
}

#[tokio::test(start_paused = true)]
async fn test_set_then_has_and_get() {
    let registry = registry();

    registry
        .set("u1", CooldownDuration::minutes(5), false)
        .unwrap();

    assert!(registry.has("u1").unwrap());
    assert_eq!(registry.get("u1"), Some(START_MS + 300_000));
    assert!(!registry.has("u2").unwrap());
    assert_eq!(registry.get("u2"), None);
}

#[tokio::test(start_paused = true)]
async fn test_ten_second_cooldown_expires_with_event() {
    let registry = registry();
    let mut started = forward(&registry, EventKind::Started);
    let mut expired = forward(&registry, EventKind::Expired);

    registry
        .set("u1", CooldownDuration::seconds(10), false)
        .unwrap();
    assert!(registry.has("u1").unwrap());

    let event = started.recv().await.unwrap();
    assert_eq!(event.records()[0].key, "u1");
    assert_eq!(event.records()[0].expires_at_ms, START_MS + 11_000);

    tokio::time::sleep(Duration::from_secs(12)).await;
    assert!(!registry.has("u1").unwrap());

    let event = expired.recv().await.unwrap();
    assert_eq!(event.kind(), EventKind::Expired);
    assert_eq!(event.records()[0].key, "u1");
    assert!(registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_replacement_emits_single_expiry() {
    let registry = registry();
    let mut started = forward(&registry, EventKind::Started);
    let mut expired = forward(&registry, EventKind::Expired);

    registry.set("k", CooldownDuration::seconds(2), false).unwrap();
    registry.set("k", CooldownDuration::seconds(20), false).unwrap();

    assert_eq!(started.recv().await.unwrap().records()[0].expires_at_ms, START_MS + 3_000);
    assert_eq!(started.recv().await.unwrap().records()[0].expires_at_ms, START_MS + 21_000);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(registry.has("k").unwrap());
    assert!(expired.try_recv().is_err());

    tokio::time::sleep(Duration::from_secs(20)).await;
    let event = expired.recv().await.unwrap();
    assert_eq!(event.records()[0].expires_at_ms, START_MS + 21_000);
    assert!(expired.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_remove_is_idempotent() {
    let registry = registry();
    let mut deleted = forward(&registry, EventKind::Deleted);

    registry.set("k", CooldownDuration::hours(1), false).unwrap();

    let removed = registry.remove("k").unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].key, "k");
    assert!(registry.remove("k").unwrap().is_empty());
    assert!(!registry.has("k").unwrap());

    let event = deleted.recv().await.unwrap();
    assert_eq!(event.records(), removed.as_slice());
    tokio::task::yield_now().await;
    assert!(deleted.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_removed_cooldown_never_expires() {
    let registry = registry();
    let mut expired = forward(&registry, EventKind::Expired);

    registry.set("k", CooldownDuration::seconds(1), false).unwrap();
    registry.remove("k").unwrap();

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(expired.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_remove_all_reports_everything_once() {
    let registry = registry();
    let mut deleted = forward(&registry, EventKind::Deleted);

    assert!(registry.remove_all().is_empty());

    registry.set("b", CooldownDuration::minutes(1), false).unwrap();
    registry.set("a", CooldownDuration::minutes(2), false).unwrap();

    let removed = registry.remove_all();
    let keys: Vec<&str> = removed.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, ["a", "b"]);
    assert!(registry.is_empty());
    assert!(registry.get_all().is_empty());

    let event = deleted.recv().await.unwrap();
    assert_eq!(event.records().len(), 2);
    tokio::task::yield_now().await;
    assert!(deleted.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_long_cooldown_is_chained() {
    let registry = registry_with(CooldownSettings {
        max_timer_delay: Duration::from_secs(60),
        ..CooldownSettings::default()
    });
    let mut expired = forward(&registry, EventKind::Expired);

    registry.set("long", CooldownDuration::minutes(5), false).unwrap();

    tokio::time::sleep(Duration::from_secs(299)).await;
    assert!(registry.has("long").unwrap());
    assert!(expired.try_recv().is_err());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!registry.has("long").unwrap());
    assert_eq!(expired.recv().await.unwrap().records()[0].key, "long");
    assert!(registry.rearm_count() >= 1);
}

#[tokio::test(start_paused = true)]
async fn test_left_renderings() {
    let registry = registry();
    registry.set("k", CooldownDuration::seconds(4), false).unwrap();

    assert_eq!(registry.left("k", LeftFormat::Digital).unwrap(), "00:05");
    assert_eq!(registry.left("k", LeftFormat::Text).unwrap(), "5 seconds");
    assert_eq!(
        registry.left("k", LeftFormat::Timestamp).unwrap(),
        "<t:1700000005:R>"
    );

    assert_eq!(registry.left("idle", LeftFormat::Digital).unwrap(), "00:00 <");
    assert_eq!(
        registry.left("idle", LeftFormat::Text).unwrap(),
        "a few milliseconds"
    );
    assert_eq!(
        registry.left("idle", LeftFormat::Timestamp).unwrap(),
        "<t:1700000000:R>"
    );
}

#[tokio::test(start_paused = true)]
async fn test_left_uses_largest_unit() {
    let registry = registry();
    registry
        .set("k", CooldownDuration::days(3).with_hours(5), false)
        .unwrap();

    assert_eq!(registry.left("k", LeftFormat::Text).unwrap(), "3 days");
    assert_eq!(registry.left("k", LeftFormat::Digital).unwrap(), "03:05:00:00");
}

#[tokio::test(start_paused = true)]
async fn test_left_format_from_name() {
    let err = "texto".parse::<LeftFormat>().unwrap_err();
    assert!(err.to_string().contains("'timestamp' | 'digital' | 'text'"));
}

#[tokio::test(start_paused = true)]
async fn test_subscriber_counts() {
    let registry = registry();
    assert_eq!(registry.count_subscribers(None), 0);

    let _started = forward(&registry, EventKind::Started);
    let _expired = forward(&registry, EventKind::Expired);

    assert_eq!(registry.count_subscribers(Some(EventKind::Started)), 1);
    assert_eq!(registry.count_subscribers(Some(EventKind::Deleted)), 0);
    assert_eq!(registry.count_subscribers(None), 2);
}
