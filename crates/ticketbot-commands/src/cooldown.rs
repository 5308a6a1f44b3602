//! Cooldown subcommands with Poise's built-in subcommand support.

use crate::framework::{Context, Error};
use crate::gate::{clear_message, ping_key, reset_message, status_message};
use poise::serenity_prelude::{self as serenity, Mentionable};
use poise::CreateReply;
use ticketbot_common::UserId;
use tracing::info;

/// Cooldown inspection and moderation.
#[poise::command(
    slash_command,
    guild_only,
    subcommands("status", "reset", "clear"),
    subcommand_required
)]
pub async fn cooldown(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Shows whether a member can use /ping again.
#[poise::command(slash_command)]
pub async fn status(
    ctx: Context<'_>,
    #[description = "Member to inspect (defaults to you)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let data = ctx.data();
    let user = user.as_ref().unwrap_or_else(|| ctx.author());

    let text = status_message(
        &data.cooldowns,
        &data.messages,
        &user.mention().to_string(),
        &ping_key(UserId(user.id.get())),
    )?;

    ctx.send(CreateReply::default().content(text).ephemeral(true))
        .await?;
    Ok(())
}

/// Lifts a member's /ping cooldown.
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
pub async fn reset(
    ctx: Context<'_>,
    #[description = "Member whose cooldown is lifted"] user: serenity::User,
) -> Result<(), Error> {
    let data = ctx.data();
    let text = reset_message(
        &data.cooldowns,
        &data.messages,
        &user.mention().to_string(),
        &ping_key(UserId(user.id.get())),
    )?;

    info!("Cooldown of {} reset by {}", user.id, ctx.author().id);
    ctx.say(text).await?;
    Ok(())
}

/// Lifts every active cooldown.
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
pub async fn clear(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let text = clear_message(&data.cooldowns, &data.messages)?;

    info!("All cooldowns cleared by {}", ctx.author().id);
    ctx.say(text).await?;
    Ok(())
}
