use poise::serenity_prelude as serenity;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::utils::formatting::fmt_utc;

/// Show server information
#[poise::command(prefix_command, slash_command, guild_only, category = "Utility")]
pub async fn serverinfo(ctx: Context<'_>) -> Result<(), Error> {
    // Cache guard must not be held across an await
    let (name, guild_id, member_count, channel_count, icon_url) = {
        let guild = ctx
            .guild()
            .ok_or_else(|| Error::custom("Not in a guild"))?;
        (
            guild.name.clone(),
            guild.id,
            guild.member_count,
            guild.channels.len(),
            guild.icon_url(),
        )
    };

    let mut embed = embeds::standard_embed()
        .title(name)
        .description(format!("ID: {}", guild_id))
        .field("Members", member_count.to_string(), true)
        .field("Channels", channel_count.to_string(), true);
    if let Some(icon_url) = icon_url {
        embed = embed.thumbnail(icon_url);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Show information about a user
#[poise::command(prefix_command, slash_command, guild_only, category = "Utility")]
pub async fn userinfo(
    ctx: Context<'_>,
    #[description = "User to inspect (defaults to you)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.as_ref().unwrap_or_else(|| ctx.author());

    let joined = match ctx.guild_id() {
        Some(guild_id) => guild_id
            .member(ctx.http(), user.id)
            .await
            .ok()
            .and_then(|member| member.joined_at)
            .map(|t| fmt_utc(t.unix_timestamp())),
        None => None,
    };

    let embed = embeds::standard_embed()
        .title(user.name.clone())
        .field("ID", user.id.to_string(), true)
        .field("Joined", joined.unwrap_or_else(|| "Unknown".to_string()), true)
        .thumbnail(user.face());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
