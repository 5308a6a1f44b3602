//! Integration tests for ticketbot-commands crate.
//!
//! These exercise the registry-facing command logic with the configured
//! ping cooldown, without a Discord connection.

use std::sync::Arc;
use std::time::Duration;
use ticketbot_commands::gate::{enter, ping_key, status_message, Gate};
use ticketbot_common::test_utils::{config_fixtures, discord_fixtures, init_test_logging};
use ticketbot_config::ConfigLoader;
use ticketbot_cooldown::{CooldownRegistry, TokioClock};
use ticketbot_i18n::Messages;

#[tokio::test(start_paused = true)]
async fn test_configured_ping_cooldown_per_member() {
    init_test_logging();

    let config = ConfigLoader::from_yaml_str(config_fixtures::full_config_yaml(), |_| None).unwrap();
    let messages = Arc::new(Messages::load().unwrap());
    let mut settings = config.cooldown.settings();
    settings.snapshot_path = None;
    let registry = CooldownRegistry::with_clock(
        settings,
        Arc::clone(&messages),
        Arc::new(TokioClock::starting_at(1_700_000_000_000)),
    );

    let users = discord_fixtures::test_user_ids(2);
    let first = ping_key(users[0]);
    let second = ping_key(users[1]);
    let cooldown = config.commands.ping_cooldown;

    assert_eq!(enter(&registry, &first, cooldown, false).unwrap(), Gate::Open);
    assert!(matches!(
        enter(&registry, &first, cooldown, false).unwrap(),
        Gate::Cooling { .. }
    ));
    assert_eq!(enter(&registry, &second, cooldown, false).unwrap(), Gate::Open);

    let status = status_message(&registry, &messages, "<@1>", &first).unwrap();
    assert!(status.contains("00:11"), "{status}");

    tokio::time::sleep(Duration::from_secs(12)).await;
    assert_eq!(enter(&registry, &first, cooldown, false).unwrap(), Gate::Open);
}
