use std::time::Duration;

use serenity::all::{ActivityData, Context, OnlineStatus};

use crate::constants::limits::PRESENCE_ROTATE_SECONDS;

/// Rotate the bot's activity text on a fixed cadence. Runs for the life of
/// the process; the guild count is re-read on every tick.
pub fn spawn_presence_rotator(ctx: Context, command_prefix: String) {
    tokio::spawn(async move {
        let mut tick = 0usize;
        loop {
            let guild_count = ctx.cache.guilds().len();
            let statuses = [
                format!("{}help | {} servers", command_prefix, guild_count),
                "moderation & fun".to_string(),
                format!("{}mcstatus <ip>", command_prefix),
            ];

            let status = statuses[tick % statuses.len()].clone();
            ctx.set_presence(Some(ActivityData::playing(status)), OnlineStatus::Online);

            tick += 1;
            tokio::time::sleep(Duration::from_secs(PRESENCE_ROTATE_SECONDS)).await;
        }
    });
}
