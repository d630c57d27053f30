use chrono::Utc;
use serenity::all::{Context, CreateMessage, Member};
use tracing::debug;

use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::limits::{AUTO_ROLE_NAME, WELCOME_CHANNEL_NAME};
use crate::services::moderation::audit;
use crate::utils::channels::{find_role_by_name, find_text_channel};
use crate::utils::formatting::fmt_utc;

/// Greet a new member: auto-role if the guild has one, welcome embed if the
/// guild has a welcome channel, audit line. Everything best-effort.
pub async fn handle_member_join(ctx: &Context, member: &Member) -> Result<(), Error> {
    let guild_id = member.guild_id;

    if let Some(role_id) = find_role_by_name(ctx, guild_id, AUTO_ROLE_NAME).await {
        if let Err(e) = member.add_role(&ctx.http, role_id).await {
            debug!(
                "Could not give {} the {} role: {:?}",
                member.user.id, AUTO_ROLE_NAME, e
            );
        }
    }

    if let Some(channel_id) = find_text_channel(ctx, guild_id, WELCOME_CHANNEL_NAME).await {
        let guild_name = guild_id
            .name(&ctx.cache)
            .unwrap_or_else(|| "the server".to_string());
        let embed = embeds::info_embed()
            .title(format!("Welcome {}!", member.display_name()))
            .description(format!(
                "Welcome to **{}**. Read the rules and have fun!",
                guild_name
            ))
            .thumbnail(member.face());

        if let Err(e) = channel_id
            .send_message(&ctx.http, CreateMessage::new().embed(embed))
            .await
        {
            debug!("Could not send welcome message: {:?}", e);
        }
    }

    audit::log_line(
        ctx,
        guild_id,
        format!(
            "🟢 <@{}> joined at {}",
            member.user.id,
            fmt_utc(Utc::now().timestamp())
        ),
    )
    .await;

    Ok(())
}
