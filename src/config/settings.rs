use std::env;

use crate::constants::limits::{
    DEFAULT_COMMAND_PREFIX, DEFAULT_SPAM_MESSAGE_THRESHOLD, DEFAULT_SPAM_MUTE_SECONDS,
    DEFAULT_SPAM_WINDOW_SECONDS,
};

/// Default on-disk database next to the binary.
const DEFAULT_DATABASE_URL: &str = "sqlite://sentry.db";

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    /// Prefix for text commands; slash variants are always registered too.
    pub command_prefix: String,
    pub guild_id: Option<u64>,
    /// Anti-spam: messages above this count inside the window earn a mute
    pub spam_message_threshold: usize,
    /// Anti-spam: rolling window in seconds
    pub spam_window_seconds: u64,
    /// Anti-spam: how long the automatic mute lasts
    pub spam_mute_seconds: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let command_prefix = env::var("COMMAND_PREFIX")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let spam_message_threshold = env::var("SPAM_MESSAGE_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SPAM_MESSAGE_THRESHOLD);

        let spam_window_seconds = env::var("SPAM_WINDOW_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SPAM_WINDOW_SECONDS);

        let spam_mute_seconds = env::var("SPAM_MUTE_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SPAM_MUTE_SECONDS);

        Ok(Self {
            discord_token,
            database_url,
            command_prefix,
            guild_id,
            spam_message_threshold,
            spam_window_seconds,
            spam_mute_seconds,
        })
    }
}
