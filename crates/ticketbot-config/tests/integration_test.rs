//! Integration tests for ticketbot-config crate.

use std::path::PathBuf;
use ticketbot_common::test_utils::{config_fixtures, create_temp_dir, discord_fixtures};
use ticketbot_common::LogFormat;
use ticketbot_config::{ConfigError, ConfigLoader};
use ticketbot_cooldown::CooldownDuration;
use ticketbot_i18n::Locale;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_minimal_config_uses_defaults() {
    let config = ConfigLoader::from_yaml_str(config_fixtures::minimal_config_yaml(), no_env).unwrap();

    assert_eq!(config.discord.token, "test_token");
    assert_eq!(config.discord.guild_id, None);
    assert_eq!(
        config.cooldown.snapshot_path,
        Some(PathBuf::from("data/cooldowns.json"))
    );
    assert_eq!(config.cooldown.locale, Locale::Portuguese);
    assert_eq!(config.commands.ping_cooldown, CooldownDuration::seconds(10));
}

#[test]
fn test_full_config() {
    let config = ConfigLoader::from_yaml_str(config_fixtures::full_config_yaml(), no_env).unwrap();

    assert_eq!(config.discord.guild_id, Some(discord_fixtures::test_guild_id()));
    assert_eq!(config.cooldown.flush_delay_ms, 500);
    assert_eq!(config.cooldown.locale, Locale::English);
    assert!(config.commands.persist_command_cooldowns);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Compact);

    let settings = config.cooldown.settings();
    assert_eq!(settings.flush_delay.as_millis(), 500);
    assert_eq!(settings.locale, Locale::English);
}

#[test]
fn test_ping_cooldown_map() {
    let yaml = "discord:\n  token: t\ncommands:\n  ping_cooldown:\n    minutes: 2\n    seconds: 30\n";
    let config = ConfigLoader::from_yaml_str(yaml, no_env).unwrap();
    assert_eq!(config.commands.ping_cooldown.total_seconds(), 151);
}

#[test]
fn test_empty_ping_cooldown_rejected() {
    let yaml = "discord:\n  token: t\ncommands:\n  ping_cooldown: {}\n";
    let err = ConfigLoader::from_yaml_str(yaml, no_env).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(problems) if problems.len() == 1));
}

#[test]
fn test_unsupported_locale_rejected_by_parser() {
    let yaml = "discord:\n  token: t\ncooldown:\n  locale: fr-FR\n";
    assert!(matches!(
        ConfigLoader::from_yaml_str(yaml, no_env),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_load_from_file() {
    let dir = create_temp_dir();
    let path = dir.path().join("config.yaml");

    std::fs::write(&path, config_fixtures::minimal_config_yaml()).unwrap();
    let minimal = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(minimal.cooldown.flush_delay_ms, 1_000);

    std::fs::write(&path, config_fixtures::full_config_yaml()).unwrap();
    let full = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(full.cooldown.flush_delay_ms, 500);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = create_temp_dir();
    let err = ConfigLoader::load_from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
