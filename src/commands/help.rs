use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;

/// Show the command overview
#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = &ctx.data().settings.command_prefix;

    let embed = embeds::standard_embed()
        .title("Sentry Help")
        .description(format!("Prefix: `{}`", prefix))
        .field(
            "Moderation",
            "`ban` `kick` `mute` `warn` `warnings` `unwarn`",
            false,
        )
        .field("Economy", "`balance` `daily` `work` `shop` `buy`", false)
        .field("Fun", "`meme` `avatar` `say`", false)
        .field(
            "Utility",
            "`serverinfo` `userinfo` `mcstatus` `ticket`",
            false,
        )
        .field(
            "Reaction Roles",
            "`reaction_role_add` `reaction_role_remove` (mod only)",
            false,
        );

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
