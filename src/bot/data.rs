use std::fmt;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Settings;
use crate::services::moderation::unmute_schedule::UnmuteSchedule;
use crate::services::spam::MessageRateTracker;

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: SqlitePool,
    pub settings: Settings,
    /// Per-user sliding windows of recent message times (anti-spam)
    pub spam_tracker: MessageRateTracker,
    /// Armed automatic unmutes, one per (guild, user)
    pub unmute_schedule: UnmuteSchedule,
    /// Outbound HTTP client (meme fetch)
    pub http_client: reqwest::Client,
}

impl Data {
    pub fn new(pool: SqlitePool, settings: Settings) -> Self {
        Self {
            pool,
            settings,
            spam_tracker: MessageRateTracker::new(),
            unmute_schedule: UnmuteSchedule::new(),
            http_client: reqwest::Client::new(),
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("tracked_users", &self.spam_tracker.len())
            .field("armed_unmutes", &self.unmute_schedule.len())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
