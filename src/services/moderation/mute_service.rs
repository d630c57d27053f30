use std::sync::Arc;
use std::time::Duration;

use serenity::all::{
    ChannelType, Context, EditRole, GuildId, Http, PermissionOverwrite, PermissionOverwriteType,
    Permissions, RoleId, UserId,
};
use tracing::{debug, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::limits::MUTE_ROLE_NAME;

/// Find the mute role, creating it on first use. A fresh role carries no
/// permissions and gets an explicit send/react deny in every text channel;
/// channels that refuse the overwrite are skipped.
pub async fn ensure_mute_role(ctx: &Context, guild_id: GuildId) -> Result<RoleId, Error> {
    let roles = guild_id.roles(&ctx.http).await?;
    if let Some((role_id, _)) = roles.iter().find(|(_, role)| role.name == MUTE_ROLE_NAME) {
        return Ok(*role_id);
    }

    let role = guild_id
        .create_role(
            &ctx.http,
            EditRole::new()
                .name(MUTE_ROLE_NAME)
                .permissions(Permissions::empty()),
        )
        .await?;

    let channels = guild_id.channels(&ctx.http).await?;
    for (channel_id, channel) in channels {
        if channel.kind != ChannelType::Text {
            continue;
        }
        let overwrite = PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::SEND_MESSAGES | Permissions::ADD_REACTIONS,
            kind: PermissionOverwriteType::Role(role.id),
        };
        if let Err(e) = channel_id.create_permission(&ctx.http, overwrite).await {
            debug!(
                "Could not deny sends for {} in channel {}: {:?}",
                MUTE_ROLE_NAME, channel_id, e
            );
        }
    }

    info!("Created {} role in guild {}", MUTE_ROLE_NAME, guild_id);
    Ok(role.id)
}

/// Grant the mute role and arm the automatic revoke. Arming invalidates any
/// earlier timer for the same user, so overlapping mutes extend rather than
/// cut each other short.
pub async fn timed_mute(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    duration: Duration,
    reason: &str,
) -> Result<(), Error> {
    let role_id = ensure_mute_role(ctx, guild_id).await?;

    ctx.http
        .add_member_role(guild_id, user_id, role_id, Some(reason))
        .await?;

    let token = data
        .unmute_schedule
        .arm(guild_id.get(), user_id.get(), role_id.get());
    spawn_unmute_timer(
        ctx.http.clone(),
        data.clone(),
        guild_id,
        user_id,
        role_id,
        duration,
        token,
    );

    info!(
        "Muted user {} in guild {} for {}s ({})",
        user_id,
        guild_id,
        duration.as_secs(),
        reason
    );

    Ok(())
}

/// Extend the revoke timer of an already muted user. Returns false when no
/// timed mute is active, in which case the caller should mute from scratch.
pub fn refresh_timed_mute(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    duration: Duration,
) -> bool {
    let Some((token, role_id)) = data.unmute_schedule.refresh(guild_id.get(), user_id.get())
    else {
        return false;
    };

    debug!(
        "Extending mute for user {} in guild {} by {}s",
        user_id,
        guild_id,
        duration.as_secs()
    );
    spawn_unmute_timer(
        ctx.http.clone(),
        data.clone(),
        guild_id,
        user_id,
        RoleId::new(role_id),
        duration,
        token,
    );
    true
}

fn spawn_unmute_timer(
    http: Arc<Http>,
    data: Arc<Data>,
    guild_id: GuildId,
    user_id: UserId,
    role_id: RoleId,
    duration: Duration,
    token: u64,
) {
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;

        if !data
            .unmute_schedule
            .complete(guild_id.get(), user_id.get(), token)
        {
            // A newer timer owns the unmute
            return;
        }

        // The role may already be gone (user left, role deleted, manual
        // removal); a failed removal only gets a log line
        match http
            .remove_member_role(guild_id, user_id, role_id, Some("Mute expired"))
            .await
        {
            Ok(()) => info!("Mute expired for user {} in guild {}", user_id, guild_id),
            Err(e) => debug!(
                "Timed unmute for {} in {} could not remove role: {:?}",
                user_id, guild_id, e
            ),
        }
    });
}
