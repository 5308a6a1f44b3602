//! Configuration loading utilities

use crate::schema::Config;
use crate::validator::ConfigValidator;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use ticketbot_common::{GuildId, TicketbotError};
use ticketbot_i18n::Locale;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "TICKETBOT_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParse {
        /// Variable name
        var: &'static str,
        /// What was wrong with its value
        message: String,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl From<ConfigError> for TicketbotError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("Configuration could not be loaded", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `TICKETBOT_CONFIG_PATH`, `config.yaml` or
    /// `config.yml`, falling back to defaults; environment overrides apply in
    /// every case.
    pub fn load() -> Result<Config, ConfigError> {
        match Self::discover(env::var(CONFIG_PATH_VAR).ok()) {
            Some(path) => Self::load_from_file(path),
            None => {
                info!("No configuration file found, using defaults");
                Self::finish(Config::default(), |name| env::var(name).ok())
            }
        }
    }

    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loading configuration from {}", path.display());
        Self::from_yaml_str(&content, |name| env::var(name).ok())
    }

    /// Parse YAML, apply overrides from `lookup` and validate.
    pub fn from_yaml_str<F>(content: &str, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config: Config = serde_yaml::from_str(content)?;
        Self::finish(config, lookup)
    }

    fn finish<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::apply_overrides(&mut config, lookup)?;
        ConfigValidator::validate(&config)?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn discover(explicit: Option<String>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        ["config.yaml", "config.yml"]
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            config.discord.token = token;
        }

        if let Some(guild) = lookup("TICKETBOT_GUILD_ID") {
            let id = guild.trim().parse().map_err(|e| ConfigError::EnvParse {
                var: "TICKETBOT_GUILD_ID",
                message: format!("{e}"),
            })?;
            config.discord.guild_id = Some(GuildId(id));
        }

        if let Some(path) = lookup("TICKETBOT_COOLDOWN_SNAPSHOT") {
            config.cooldown.snapshot_path = if path.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        if let Some(code) = lookup("TICKETBOT_LOCALE") {
            config.cooldown.locale =
                Locale::from_code(code.trim()).ok_or_else(|| ConfigError::EnvParse {
                    var: "TICKETBOT_LOCALE",
                    message: format!("unsupported locale '{code}'"),
                })?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_overrides_win_over_file() {
        let yaml = "discord:\n  token: from_file\ncooldown:\n  locale: en-US\n";
        let config = ConfigLoader::from_yaml_str(
            yaml,
            env_of(&[
                ("DISCORD_TOKEN", "from_env"),
                ("TICKETBOT_GUILD_ID", "42"),
                ("TICKETBOT_LOCALE", "pt"),
                ("LOG_LEVEL", "debug"),
            ]),
        )
        .unwrap();

        assert_eq!(config.discord.token, "from_env");
        assert_eq!(config.discord.guild_id, Some(GuildId(42)));
        assert_eq!(config.cooldown.locale, Locale::Portuguese);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_snapshot_override_disables_persistence() {
        let config = ConfigLoader::from_yaml_str(
            "discord:\n  token: t\n",
            env_of(&[("TICKETBOT_COOLDOWN_SNAPSHOT", "")]),
        )
        .unwrap();
        assert_eq!(config.cooldown.snapshot_path, None);
    }

    #[test]
    fn test_bad_env_values() {
        let err = ConfigLoader::from_yaml_str(
            "discord:\n  token: t\n",
            env_of(&[("TICKETBOT_GUILD_ID", "not-a-number")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParse { var: "TICKETBOT_GUILD_ID", .. }));

        let err = ConfigLoader::from_yaml_str(
            "discord:\n  token: t\n",
            env_of(&[("TICKETBOT_LOCALE", "fr-FR")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("fr-FR"));
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let err = ConfigLoader::from_yaml_str("{}", env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_explicit_path_wins_discovery() {
        assert_eq!(
            ConfigLoader::discover(Some("/etc/ticketbot.yaml".to_string())),
            Some(PathBuf::from("/etc/ticketbot.yaml"))
        );
    }

    #[test]
    fn test_converts_to_common_error() {
        let err: TicketbotError = ConfigError::Validation(vec!["x".to_string()]).into();
        assert!(matches!(err, TicketbotError::Config { .. }));
    }
}
