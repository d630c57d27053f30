use std::sync::Arc;

use serenity::all::{Context, Reaction, RoleId};
use tracing::debug;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::queries::reaction_roles;

/// Grant the bound role when someone reacts on a bound message. Works from
/// the raw payload, so uncached messages are fine; a vanished role or member
/// just produces no effect.
pub async fn handle_reaction_add(
    ctx: &Context,
    data: &Arc<Data>,
    reaction: &Reaction,
) -> Result<(), Error> {
    let Some(guild_id) = reaction.guild_id else {
        return Ok(());
    };
    let Some(user_id) = reaction.user_id else {
        return Ok(());
    };
    if user_id == ctx.cache.current_user().id {
        return Ok(());
    }

    let emoji = reaction.emoji.to_string();
    let Some(role_id) =
        reaction_roles::find_role(&data.pool, reaction.message_id.get() as i64, &emoji).await?
    else {
        return Ok(());
    };

    if let Err(e) = ctx
        .http
        .add_member_role(
            guild_id,
            user_id,
            RoleId::new(role_id as u64),
            Some("Reaction role add"),
        )
        .await
    {
        debug!(
            "Could not grant reaction role {} to user {}: {:?}",
            role_id, user_id, e
        );
    }

    Ok(())
}

/// Symmetric to the add path: removing the reaction revokes the bound role.
pub async fn handle_reaction_remove(
    ctx: &Context,
    data: &Arc<Data>,
    reaction: &Reaction,
) -> Result<(), Error> {
    let Some(guild_id) = reaction.guild_id else {
        return Ok(());
    };
    let Some(user_id) = reaction.user_id else {
        return Ok(());
    };
    if user_id == ctx.cache.current_user().id {
        return Ok(());
    }

    let emoji = reaction.emoji.to_string();
    let Some(role_id) =
        reaction_roles::find_role(&data.pool, reaction.message_id.get() as i64, &emoji).await?
    else {
        return Ok(());
    };

    if let Err(e) = ctx
        .http
        .remove_member_role(
            guild_id,
            user_id,
            RoleId::new(role_id as u64),
            Some("Reaction role remove"),
        )
        .await
    {
        debug!(
            "Could not revoke reaction role {} from user {}: {:?}",
            role_id, user_id, e
        );
    }

    Ok(())
}
