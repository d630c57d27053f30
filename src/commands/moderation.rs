use std::time::Duration;

use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::limits::DEFAULT_MUTE_SECONDS;
use crate::db::queries::warns;
use crate::services::moderation::{audit, mute_service};
use crate::utils::formatting::fmt_utc;

/// Ban a member from the server
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    category = "Moderation"
)]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "User to ban"] user: serenity::User,
    #[description = "Reason for the ban"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or_else(|| Error::custom("Not in a guild"))?;
    let reason = reason.unwrap_or_else(|| "No reason provided".to_owned());

    match guild_id
        .ban_with_reason(ctx.http(), user.id, 0, &reason)
        .await
    {
        Ok(()) => {
            ctx.say(format!("✅ Banned {} — {}", user.name, reason)).await?;
            audit::log_line(
                ctx.serenity_context(),
                guild_id,
                format!("🔨 <@{}> banned <@{}> — {}", ctx.author().id, user.id, reason),
            )
            .await;
        }
        Err(e) => {
            warn!("Ban of {} failed: {:?}", user.id, e);
            ctx.say(format!("Could not ban <@{}>: {}", user.id, e)).await?;
        }
    }

    Ok(())
}

/// Kick a member from the server
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    category = "Moderation"
)]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "User to kick"] user: serenity::User,
    #[description = "Reason for the kick"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or_else(|| Error::custom("Not in a guild"))?;
    let reason = reason.unwrap_or_else(|| "No reason provided".to_owned());

    match guild_id
        .kick_with_reason(ctx.http(), user.id, &reason)
        .await
    {
        Ok(()) => {
            ctx.say(format!("✅ Kicked {} — {}", user.name, reason)).await?;
            audit::log_line(
                ctx.serenity_context(),
                guild_id,
                format!("👢 <@{}> kicked <@{}> — {}", ctx.author().id, user.id, reason),
            )
            .await;
        }
        Err(e) => {
            warn!("Kick of {} failed: {:?}", user.id, e);
            ctx.say(format!("Could not kick <@{}>: {}", user.id, e)).await?;
        }
    }

    Ok(())
}

/// Mute a member for a while (default 60 seconds)
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    category = "Moderation"
)]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "User to mute"] user: serenity::User,
    #[description = "Mute length in seconds"] seconds: Option<u64>,
    #[description = "Reason for the mute"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or_else(|| Error::custom("Not in a guild"))?;
    let seconds = seconds.unwrap_or(DEFAULT_MUTE_SECONDS);
    let reason = reason.unwrap_or_else(|| "No reason provided".to_owned());

    match mute_service::timed_mute(
        ctx.serenity_context(),
        ctx.data(),
        guild_id,
        user.id,
        Duration::from_secs(seconds),
        &reason,
    )
    .await
    {
        Ok(()) => {
            ctx.say(format!("🔇 Muted <@{}> for {}s — {}", user.id, seconds, reason))
                .await?;
            audit::log_line(
                ctx.serenity_context(),
                guild_id,
                format!(
                    "🔇 <@{}> muted <@{}> for {}s — {}",
                    ctx.author().id,
                    user.id,
                    seconds,
                    reason
                ),
            )
            .await;
        }
        Err(Error::Discord(e)) => {
            warn!("Mute of {} failed: {:?}", user.id, e);
            ctx.say(format!("Could not mute <@{}>: {}", user.id, e)).await?;
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Warn a member
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    category = "Moderation"
)]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "User to warn"] user: serenity::User,
    #[description = "Reason for the warning"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or_else(|| Error::custom("Not in a guild"))?;
    let reason = reason.unwrap_or_else(|| "No reason provided".to_owned());
    let now = Utc::now().timestamp();

    let warning = warns::create(
        &ctx.data().pool,
        user.id.get() as i64,
        ctx.author().id.get() as i64,
        &reason,
        now,
    )
    .await?;

    ctx.say(format!("⚠️ Warned {} — {}", user.name, reason)).await?;
    audit::log_line(
        ctx.serenity_context(),
        guild_id,
        format!(
            "⚠️ <@{}> warned <@{}> (warn id {}) — {} at {}",
            ctx.author().id,
            user.id,
            warning.id,
            reason,
            fmt_utc(now)
        ),
    )
    .await;

    Ok(())
}

/// List a member's warnings
#[poise::command(prefix_command, slash_command, guild_only, category = "Moderation")]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "User to check (defaults to you)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.as_ref().unwrap_or_else(|| ctx.author());
    let rows = warns::list_for_user(&ctx.data().pool, user.id.get() as i64).await?;

    if rows.is_empty() {
        ctx.say(format!("No warns for {}.", user.name)).await?;
        return Ok(());
    }

    let mut embed = embeds::warning_embed().title(format!("Warnings for {}", user.name));
    for warning in &rows {
        embed = embed.field(
            format!("ID {} by <@{}>", warning.id, warning.mod_id),
            format!("{} at {}", warning.reason, fmt_utc(warning.time)),
            false,
        );
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Remove a warning by id
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    category = "Moderation"
)]
pub async fn unwarn(
    ctx: Context<'_>,
    #[description = "Warning id to remove"] warn_id: i64,
) -> Result<(), Error> {
    let existed = warns::delete(&ctx.data().pool, warn_id).await?;

    if existed {
        ctx.say(format!("Removed warn id {}.", warn_id)).await?;
        if let Some(guild_id) = ctx.guild_id() {
            audit::log_line(
                ctx.serenity_context(),
                guild_id,
                format!("<@{}> removed warn id {}", ctx.author().id, warn_id),
            )
            .await;
        }
    } else {
        ctx.say(format!("No warning with id {}.", warn_id)).await?;
    }

    Ok(())
}
