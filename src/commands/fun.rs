use poise::serenity_prelude as serenity;
use rand::Rng;
use tracing::debug;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;

const MEME_SOURCE_URL: &str = "https://www.reddit.com/r/memes/top.json?limit=50&t=day";
const MEME_USER_AGENT: &str = "sentry-bot/0.1";

/// Fetch a top meme of the day
#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn meme(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    match fetch_meme(ctx).await {
        Ok((title, image_url)) => {
            let mut embed = embeds::standard_embed().title(title);
            if let Some(url) = image_url {
                embed = embed.image(url);
            }
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(e) => {
            debug!("Meme fetch failed: {:?}", e);
            ctx.say("Could not fetch a meme right now.").await?;
        }
    }

    Ok(())
}

async fn fetch_meme(ctx: Context<'_>) -> Result<(String, Option<String>), Error> {
    let listing: serde_json::Value = ctx
        .data()
        .http_client
        .get(MEME_SOURCE_URL)
        .header(reqwest::header::USER_AGENT, MEME_USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let posts = listing["data"]["children"]
        .as_array()
        .filter(|posts| !posts.is_empty())
        .ok_or_else(|| Error::custom("empty meme listing"))?;

    let post = &posts[rand::rng().random_range(0..posts.len())]["data"];
    let title = post["title"].as_str().unwrap_or("meme").to_string();

    let image_url = post["url_overridden_by_dest"]
        .as_str()
        .filter(|url| {
            url.ends_with(".jpg")
                || url.ends_with(".png")
                || url.ends_with(".gif")
                || url.contains("i.redd.it")
        })
        .map(str::to_string);

    Ok((title, image_url))
}

/// Show someone's avatar
#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn avatar(
    ctx: Context<'_>,
    #[description = "User to show (defaults to you)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.as_ref().unwrap_or_else(|| ctx.author());

    let embed = embeds::standard_embed()
        .title(format!("{}'s avatar", user.name))
        .image(user.face());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Make the bot say something
#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn say(
    ctx: Context<'_>,
    #[description = "Message to repeat"]
    #[rest]
    message: String,
) -> Result<(), Error> {
    if let poise::Context::Prefix(prefix_ctx) = ctx {
        // Drop the invoking message so only the bot line remains
        if let Err(e) = prefix_ctx.msg.delete(ctx.http()).await {
            debug!("Could not delete say invocation: {:?}", e);
        }
        ctx.channel_id().say(ctx.http(), message).await?;
    } else {
        ctx.say(message).await?;
    }

    Ok(())
}
