//! Runtime validation of a loaded configuration.

use crate::defaults::max_timer_delay_ms;
use crate::loader::ConfigError;
use crate::schema::Config;

/// Longest accepted snapshot write-coalescing window.
pub const MAX_FLUSH_DELAY_MS: u64 = 60_000;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let problems = Self::problems(config);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }

    /// Every problem found in `config`.
    pub fn problems(config: &Config) -> Vec<String> {
        let mut problems = Vec::new();

        if config.discord.token.trim().is_empty() {
            problems.push("discord.token cannot be empty".to_string());
        }

        if config.discord.guild_id.is_some_and(|guild| guild.0 == 0) {
            problems.push("discord.guild_id must be a non-zero snowflake".to_string());
        }

        let flush = config.cooldown.flush_delay_ms;
        if !(1..=MAX_FLUSH_DELAY_MS).contains(&flush) {
            problems.push(format!(
                "cooldown.flush_delay_ms must be between 1 and {MAX_FLUSH_DELAY_MS}, got {flush}"
            ));
        }

        let max_delay = config.cooldown.max_timer_delay_ms;
        let limit = max_timer_delay_ms();
        if !(1..=limit).contains(&max_delay) {
            problems.push(format!(
                "cooldown.max_timer_delay_ms must be between 1 and {limit}, got {max_delay}"
            ));
        }

        if let Err(e) = config
            .commands
            .ping_cooldown
            .validate("commands.ping_cooldown")
        {
            problems.push(e.to_string());
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketbot_cooldown::CooldownDuration;

    fn valid() -> Config {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(ConfigValidator::validate(&valid()).is_ok());
    }

    #[test]
    fn test_collects_all_problems() {
        let mut config = Config::default();
        config.cooldown.flush_delay_ms = 0;
        config.cooldown.max_timer_delay_ms = u64::MAX;
        config.commands.ping_cooldown = CooldownDuration::default();

        let problems = ConfigValidator::problems(&config);
        assert_eq!(problems.len(), 4);
        assert!(problems[0].contains("discord.token"));
        assert!(problems[1].contains("flush_delay_ms"));
        assert!(problems[2].contains("max_timer_delay_ms"));
        assert!(problems[3].contains("commands.ping_cooldown"));
    }

    #[test]
    fn test_zero_guild_rejected() {
        let mut config = valid();
        config.discord.guild_id = Some(ticketbot_common::GuildId(0));
        let problems = ConfigValidator::problems(&config);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("guild_id"));
    }

    #[test]
    fn test_flush_delay_bounds() {
        let mut config = valid();
        config.cooldown.flush_delay_ms = MAX_FLUSH_DELAY_MS;
        assert!(ConfigValidator::validate(&config).is_ok());
        config.cooldown.flush_delay_ms = MAX_FLUSH_DELAY_MS + 1;
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
