//! Poise framework setup and command registration logic.

use std::sync::Arc;
use ticketbot_config::Config;
use ticketbot_cooldown::CooldownRegistry;
use ticketbot_i18n::{Locale, Messages};
use tracing::error;

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Shared cooldown registry.
    pub cooldowns: CooldownRegistry,
    /// Localized message catalogue.
    pub messages: Arc<Messages>,
}

impl Data {
    /// Locale of command replies.
    pub fn locale(&self) -> Locale {
        self.cooldowns.locale()
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every command the bot registers.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![crate::ping::ping(), crate::cooldown::cooldown()]
}

/// Creates a new Poise framework.
pub fn create_framework() -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: commands(),
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    })
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                command = %ctx.command().qualified_name,
                user = %ctx.author().id,
                "Command failed: {}",
                error
            );
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
