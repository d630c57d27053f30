use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::limits::format_wait;
use crate::db::queries::{economy, shop};
use crate::services::economy::{self as economy_service, DailyOutcome};
use crate::utils::channels::find_role_by_name;

/// Check a coin balance
#[poise::command(prefix_command, slash_command, aliases("bal"), category = "Economy")]
pub async fn balance(
    ctx: Context<'_>,
    #[description = "User to check (defaults to you)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.as_ref().unwrap_or_else(|| ctx.author());
    let account = economy::get_or_create_account(&ctx.data().pool, user.id.get() as i64).await?;

    ctx.say(format!("<@{}> has 💰 {} coins.", user.id, account.balance))
        .await?;
    Ok(())
}

/// Claim your daily coins (once per 24h)
#[poise::command(prefix_command, slash_command, category = "Economy")]
pub async fn daily(ctx: Context<'_>) -> Result<(), Error> {
    let outcome = economy_service::daily_claim(
        &ctx.data().pool,
        ctx.author().id.get() as i64,
        Utc::now().timestamp(),
    )
    .await?;

    match outcome {
        DailyOutcome::Granted { amount } => {
            ctx.say(format!("🎁 You claimed your daily {} coins!", amount))
                .await?;
        }
        DailyOutcome::OnCooldown { wait_secs } => {
            ctx.say(format!(
                "You've already claimed your daily. Try again in {}.",
                format_wait(wait_secs)
            ))
            .await?;
        }
    }

    Ok(())
}

/// Work a shift and earn some coins
#[poise::command(prefix_command, slash_command, category = "Economy")]
pub async fn work(ctx: Context<'_>) -> Result<(), Error> {
    let amount =
        economy_service::work(&ctx.data().pool, ctx.author().id.get() as i64).await?;

    ctx.say(format!("💼 You worked and earned {} coins!", amount))
        .await?;
    Ok(())
}

/// Browse the shop
#[poise::command(prefix_command, slash_command, category = "Economy")]
pub async fn shop(ctx: Context<'_>) -> Result<(), Error> {
    let items = shop::list_items(&ctx.data().pool).await?;

    let prefix = &ctx.data().settings.command_prefix;
    let mut embed = embeds::success_embed()
        .title("Shop")
        .description(format!("Buy items with `{}buy <item>`", prefix));
    for item in &items {
        embed = embed.field(
            format!("{} — {} coins", item.item, item.price),
            item.description.clone(),
            false,
        );
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Buy an item from the shop
#[poise::command(prefix_command, slash_command, category = "Economy")]
pub async fn buy(
    ctx: Context<'_>,
    #[description = "Item to buy"] item: String,
) -> Result<(), Error> {
    let item = item.trim();

    let purchase =
        match economy_service::purchase(&ctx.data().pool, ctx.author().id.get() as i64, item)
            .await
        {
            Ok(purchase) => purchase,
            Err(e @ (Error::UnknownItem(_) | Error::InsufficientFunds { .. })) => {
                ctx.say(e.to_string()).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

    ctx.say(format!(
        "Purchased {} for {} coins.",
        purchase.item, purchase.price
    ))
    .await?;

    // Items that share a name with a guild role double as role grants
    if let Some(guild_id) = ctx.guild_id() {
        if let Some(role_id) =
            find_role_by_name(ctx.serenity_context(), guild_id, &purchase.item).await
        {
            match ctx
                .http()
                .add_member_role(guild_id, ctx.author().id, role_id, Some("Shop purchase"))
                .await
            {
                Ok(()) => {
                    ctx.say(format!("Given role {}.", purchase.item)).await?;
                }
                Err(e) => {
                    debug!(
                        "Could not grant purchased role {} to {}: {:?}",
                        purchase.item,
                        ctx.author().id,
                        e
                    );
                }
            }
        }
    }

    Ok(())
}
