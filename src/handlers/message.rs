use std::sync::Arc;
use std::time::{Duration, Instant};

use serenity::all::{Context, Message};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::services::spam;

/// Feed every guild message through the spam window; command dispatch itself
/// is poise's job and happens separately.
pub async fn handle_message(
    ctx: &Context,
    data: &Arc<Data>,
    message: &Message,
) -> Result<(), Error> {
    if message.author.bot {
        return Ok(());
    }
    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };

    let window = Duration::from_secs(data.settings.spam_window_seconds);
    let count = data
        .spam_tracker
        .record(message.author.id.get(), Instant::now(), window);

    if count > data.settings.spam_message_threshold {
        spam::handle_flood(ctx, data, guild_id, message.channel_id, message.author.id).await?;
    }

    Ok(())
}
