use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serenity::all::{ChannelId, Context, GuildId, UserId};
use tracing::warn;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::services::moderation::{audit, mute_service};

/// Per-user sliding window of recent message times.
pub struct MessageRateTracker {
    windows: DashMap<u64, VecDeque<Instant>>,
}

impl MessageRateTracker {
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    /// Record one message and return how many of the user's messages fall
    /// inside the window, the new one included. Prune and append happen under
    /// the user's map entry, so concurrent handlers cannot interleave inside
    /// the sequence.
    pub fn record(&self, user_id: u64, now: Instant, window: Duration) -> usize {
        let mut events = self.windows.entry(user_id).or_default();

        while let Some(front) = events.front() {
            if now.duration_since(*front) >= window {
                events.pop_front();
            } else {
                break;
            }
        }

        events.push_back(now);
        events.len()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }
}

impl Default for MessageRateTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A user blew past the message-rate threshold: mute them for the configured
/// cool-off and say so in the channel. While the auto-mute is active, further
/// bursts only push the unmute timer out; they never stack a second timer or
/// repeat the announcement.
pub async fn handle_flood(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    channel_id: ChannelId,
    user_id: UserId,
) -> Result<(), Error> {
    let cool_off = Duration::from_secs(data.settings.spam_mute_seconds);

    if mute_service::refresh_timed_mute(ctx, data, guild_id, user_id, cool_off) {
        return Ok(());
    }

    mute_service::timed_mute(ctx, data, guild_id, user_id, cool_off, "Flooding the channel")
        .await?;

    if let Err(e) = channel_id
        .say(
            &ctx.http,
            format!("<@{}> has been muted for spamming.", user_id),
        )
        .await
    {
        warn!("Could not announce spam mute in {}: {:?}", channel_id, e);
    }

    audit::log_line(
        ctx,
        guild_id,
        format!("Auto-muted <@{}> for spamming.", user_id),
    )
    .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(6);

    #[test]
    fn six_quick_messages_cross_the_threshold() {
        let tracker = MessageRateTracker::new();
        let base = Instant::now();

        let mut last = 0;
        for i in 0..6u64 {
            last = tracker.record(1, base + Duration::from_millis(500 * i), WINDOW);
        }

        // Six messages inside six seconds: count exceeds the threshold of 5
        assert_eq!(last, 6);
    }

    #[test]
    fn five_messages_stay_under_the_threshold() {
        let tracker = MessageRateTracker::new();
        let base = Instant::now();

        let mut last = 0;
        for i in 0..5u64 {
            last = tracker.record(1, base + Duration::from_secs(i), WINDOW);
        }

        assert_eq!(last, 5);
    }

    #[test]
    fn old_messages_fall_out_of_the_window() {
        let tracker = MessageRateTracker::new();
        let base = Instant::now();

        for i in 0..5u64 {
            tracker.record(1, base + Duration::from_millis(100 * i), WINDOW);
        }

        // Seven seconds later the burst has aged out entirely
        let count = tracker.record(1, base + Duration::from_secs(7), WINDOW);
        assert_eq!(count, 1);
    }

    #[test]
    fn users_are_tracked_independently() {
        let tracker = MessageRateTracker::new();
        let base = Instant::now();

        for i in 0..6u64 {
            tracker.record(1, base + Duration::from_millis(200 * i), WINDOW);
        }

        assert_eq!(tracker.record(2, base + Duration::from_secs(2), WINDOW), 1);
    }
}
