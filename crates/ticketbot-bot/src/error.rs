//! Application-wide error types using thiserror.

use poise::serenity_prelude as serenity;
use ticketbot_common::TicketbotError;
use ticketbot_config::ConfigError;
use ticketbot_cooldown::PersistenceError;
use ticketbot_i18n::I18nError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shared infrastructure error, e.g. logging setup.
    #[error(transparent)]
    Common(#[from] TicketbotError),

    /// Message catalogue could not be built.
    #[error("Localization error: {0}")]
    Localization(#[from] I18nError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// Cooldown snapshot could not be written.
    #[error("Cooldown persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
