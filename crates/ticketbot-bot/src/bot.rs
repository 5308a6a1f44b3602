//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use crate::lifecycle::flush_cooldowns;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use ticketbot_commands::{create_framework, Data};
use ticketbot_config::Config;
use ticketbot_cooldown::CooldownRegistry;
use ticketbot_i18n::Messages;
use tracing::{error, info};

/// Main bot structure.
pub struct TicketbotBot {
    config: Arc<Config>,
    cooldowns: CooldownRegistry,
    messages: Arc<Messages>,
}

impl TicketbotBot {
    /// Creates a new bot instance around an already rehydrated registry.
    pub fn new(config: Config, cooldowns: CooldownRegistry, messages: Arc<Messages>) -> Self {
        Self {
            config: Arc::new(config),
            cooldowns,
            messages,
        }
    }

    /// Starts the bot and runs until the gateway connection ends.
    ///
    /// Ctrl-C flushes the cooldown snapshot and shuts all shards down.
    pub async fn start(&self) -> BotResult<()> {
        let config = Arc::clone(&self.config);
        let cooldowns = self.cooldowns.clone();
        let messages = Arc::clone(&self.messages);
        let guild_id = self.config.discord.guild_id;

        let framework = create_framework()
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Connected as {}", ready.user.name);
                    let commands = &framework.options().commands;
                    match guild_id {
                        Some(guild) => {
                            let guild = serenity::GuildId::new(guild.0);
                            poise::builtins::register_in_guild(ctx, commands, guild).await?;
                            info!("Registered {} commands in guild {}", commands.len(), guild);
                        }
                        None => {
                            poise::builtins::register_globally(ctx, commands).await?;
                            info!("Registered {} commands globally", commands.len());
                        }
                    }
                    Ok(Data {
                        config,
                        cooldowns,
                        messages,
                    })
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(
            &self.config.discord.token,
            serenity::GatewayIntents::non_privileged(),
        )
        .framework(framework)
        .await?;

        spawn_shutdown_handler(Arc::clone(&client.shard_manager), self.cooldowns.clone());

        client.start().await?;
        Ok(())
    }
}

fn spawn_shutdown_handler(shard_manager: Arc<serenity::ShardManager>, cooldowns: CooldownRegistry) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            return;
        }

        info!("Shutdown signal received");
        flush_cooldowns(&cooldowns);
        shard_manager.shutdown_all().await;
    });
}
