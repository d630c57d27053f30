use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::services::tickets;

/// Open a private support ticket
#[poise::command(prefix_command, slash_command, guild_only, category = "Utility")]
pub async fn ticket(
    ctx: Context<'_>,
    #[description = "What the ticket is about"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or_else(|| Error::custom("Not in a guild"))?;

    let channel_id = tickets::open_ticket(
        ctx.serenity_context(),
        guild_id,
        ctx.author(),
        reason.as_deref(),
    )
    .await?;

    ctx.say(format!("Your ticket has been created: <#{}>", channel_id))
        .await?;
    Ok(())
}
