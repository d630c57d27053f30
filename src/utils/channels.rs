use serenity::all::{ChannelId, ChannelType, Context, GuildId, RoleId};

/// Look up a text channel by name. None when the guild has no such channel
/// or the channel list cannot be fetched.
pub async fn find_text_channel(
    ctx: &Context,
    guild_id: GuildId,
    name: &str,
) -> Option<ChannelId> {
    let channels = guild_id.channels(&ctx.http).await.ok()?;
    channels
        .into_iter()
        .find(|(_, channel)| channel.kind == ChannelType::Text && channel.name == name)
        .map(|(channel_id, _)| channel_id)
}

/// Look up a role by exact name.
pub async fn find_role_by_name(
    ctx: &Context,
    guild_id: GuildId,
    name: &str,
) -> Option<RoleId> {
    let roles = guild_id.roles(&ctx.http).await.ok()?;
    roles
        .into_iter()
        .find(|(_, role)| role.name == name)
        .map(|(role_id, _)| role_id)
}
