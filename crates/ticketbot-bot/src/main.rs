//! Main entry point for ticketbot.

use std::sync::Arc;
use ticketbot_bot::{flush_cooldowns, log_lifecycle, BotResult, TicketbotBot};
use ticketbot_common::init_logging;
use ticketbot_config::ConfigLoader;
use ticketbot_cooldown::CooldownRegistry;
use ticketbot_i18n::Messages;
use tracing::{error, info};

#[tokio::main]
async fn main() -> BotResult<()> {
    let config = ConfigLoader::load()?;
    let _log_guard = init_logging(&config.logging)?;

    info!("Starting ticketbot {}", env!("CARGO_PKG_VERSION"));

    let messages = Arc::new(Messages::load()?);
    let cooldowns = CooldownRegistry::new(config.cooldown.settings(), Arc::clone(&messages));
    log_lifecycle(&cooldowns);
    cooldowns.rehydrate();

    let bot = TicketbotBot::new(config, cooldowns.clone(), messages);
    let result = bot.start().await;

    flush_cooldowns(&cooldowns);
    if let Err(e) = &result {
        error!("Bot stopped with error: {}", e);
    }
    result
}
