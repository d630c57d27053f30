use poise::serenity_prelude as serenity;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::db::queries::reaction_roles;

/// Bind an emoji on a message to a role
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    category = "Reaction Roles"
)]
pub async fn reaction_role_add(
    ctx: Context<'_>,
    #[description = "Message id to watch"] message_id: String,
    #[description = "Emoji that grants the role"] emoji: String,
    #[description = "Role to grant"] role: serenity::Role,
) -> Result<(), Error> {
    // Message ids exceed the slash-command integer range, so the id arrives
    // as text
    let Ok(message_id) = message_id.parse::<u64>() else {
        ctx.say(format!("`{}` is not a message id.", message_id)).await?;
        return Ok(());
    };

    reaction_roles::bind(
        &ctx.data().pool,
        message_id as i64,
        &emoji,
        role.id.get() as i64,
    )
    .await?;

    ctx.say(format!(
        "Added reaction role: {} -> {} for message `{}`",
        emoji, role.name, message_id
    ))
    .await?;

    Ok(())
}

/// Remove every role binding for an emoji on a message
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    category = "Reaction Roles"
)]
pub async fn reaction_role_remove(
    ctx: Context<'_>,
    #[description = "Message id"] message_id: String,
    #[description = "Emoji to unbind"] emoji: String,
) -> Result<(), Error> {
    let Ok(message_id) = message_id.parse::<u64>() else {
        ctx.say(format!("`{}` is not a message id.", message_id)).await?;
        return Ok(());
    };

    let removed = reaction_roles::unbind(&ctx.data().pool, message_id as i64, &emoji).await?;

    if removed > 0 {
        ctx.say("Removed reaction role.").await?;
    } else {
        ctx.say("No reaction role bound to that message and emoji.").await?;
    }

    Ok(())
}
