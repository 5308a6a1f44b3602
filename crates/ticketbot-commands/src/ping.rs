//! Ping command guarded by a per-member cooldown.

use crate::framework::{Context, Error};
use crate::gate::{enter, ping_key, Gate};
use poise::CreateReply;
use ticketbot_common::UserId;
use tracing::{debug, info};

/// Checks the bot's gateway latency.
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let locale = data.locale();
    let key = ping_key(UserId(ctx.author().id.get()));
    let commands = &data.config.commands;

    match enter(
        &data.cooldowns,
        &key,
        commands.ping_cooldown,
        commands.persist_command_cooldowns,
    )? {
        Gate::Cooling { left, timestamp } => {
            debug!(key = %key, "Ping rejected, cooling down");
            let text = data.messages.format_with(
                locale,
                "ping-on-cooldown",
                &[("left", left), ("timestamp", timestamp)],
            )?;
            ctx.send(CreateReply::default().content(text).ephemeral(true))
                .await?;
        }
        Gate::Open => {
            let latency = ctx.ping().await;
            let text = data.messages.format_with(
                locale,
                "ping-reply",
                &[("latency", format!("{} ms", latency.as_millis()))],
            )?;
            ctx.say(text).await?;
            info!("Ping command executed by user {}", ctx.author().id);
        }
    }

    Ok(())
}
