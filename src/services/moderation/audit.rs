use serenity::all::{Context, GuildId};
use tracing::{info, warn};

use crate::constants::limits::LOG_CHANNEL_NAME;
use crate::utils::channels::find_text_channel;

/// Post one human-readable line to the guild's #mod-logs channel. Best
/// effort: a missing channel or failed send never rolls back the action that
/// produced the line, it just falls back to the process log.
pub async fn log_line(ctx: &Context, guild_id: GuildId, line: impl Into<String>) {
    let line = line.into();
    info!("audit[{}]: {}", guild_id, line);

    let Some(channel_id) = find_text_channel(ctx, guild_id, LOG_CHANNEL_NAME).await else {
        return;
    };

    if let Err(e) = channel_id.say(&ctx.http, &line).await {
        warn!(
            "Could not write audit line to #{} in guild {}: {:?}",
            LOG_CHANNEL_NAME, guild_id, e
        );
    }
}
