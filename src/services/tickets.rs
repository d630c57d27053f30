use serenity::all::{
    ChannelId, ChannelType, Context, CreateChannel, GuildId, PermissionOverwrite,
    PermissionOverwriteType, Permissions, RoleId, User,
};
use tracing::info;

use crate::bot::error::Error;
use crate::constants::limits::TICKET_CATEGORY_NAME;

/// Open a private ticket channel for a user under the Tickets category,
/// visible only to the requester and the bot.
pub async fn open_ticket(
    ctx: &Context,
    guild_id: GuildId,
    requester: &User,
    reason: Option<&str>,
) -> Result<ChannelId, Error> {
    let category_id = ensure_ticket_category(ctx, guild_id).await?;
    let bot_user_id = ctx.cache.current_user().id;

    // The @everyone role id equals the guild id
    let overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(requester.id),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot_user_id),
        },
    ];

    let channel = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(format!("ticket-{}", requester.name.to_lowercase()))
                .kind(ChannelType::Text)
                .category(category_id)
                .permissions(overwrites),
        )
        .await?;

    channel
        .id
        .say(
            &ctx.http,
            format!(
                "Ticket created by <@{}>\nReason: {}",
                requester.id,
                reason.unwrap_or("No reason provided")
            ),
        )
        .await?;

    info!(
        "Opened ticket channel {} for user {} in guild {}",
        channel.id, requester.id, guild_id
    );

    Ok(channel.id)
}

async fn ensure_ticket_category(ctx: &Context, guild_id: GuildId) -> Result<ChannelId, Error> {
    let channels = guild_id.channels(&ctx.http).await?;
    if let Some((channel_id, _)) = channels
        .iter()
        .find(|(_, c)| c.kind == ChannelType::Category && c.name == TICKET_CATEGORY_NAME)
    {
        return Ok(*channel_id);
    }

    let category = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(TICKET_CATEGORY_NAME).kind(ChannelType::Category),
        )
        .await?;

    Ok(category.id)
}
