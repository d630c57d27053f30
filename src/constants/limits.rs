/// Anti-spam defaults (overridable via env vars): messages above the
/// threshold inside the rolling window earn a temporary mute.
pub const DEFAULT_SPAM_MESSAGE_THRESHOLD: usize = 5;
pub const DEFAULT_SPAM_WINDOW_SECONDS: u64 = 6;
pub const DEFAULT_SPAM_MUTE_SECONDS: u64 = 30;

/// Mute length for `mute` when no duration is given.
pub const DEFAULT_MUTE_SECONDS: u64 = 60;

/// Economy numbers.
pub const STARTING_BALANCE: i64 = 100;
pub const DAILY_COOLDOWN_SECONDS: i64 = 24 * 3600;
pub const DAILY_REWARD_MIN: i64 = 100;
pub const DAILY_REWARD_MAX: i64 = 300;
pub const WORK_REWARD_MIN: i64 = 20;
pub const WORK_REWARD_MAX: i64 = 150;

/// Well-known guild fixtures the bot looks up by name.
pub const MUTE_ROLE_NAME: &str = "Muted";
pub const AUTO_ROLE_NAME: &str = "Member";
pub const WELCOME_CHANNEL_NAME: &str = "welcome";
pub const LOG_CHANNEL_NAME: &str = "mod-logs";
pub const TICKET_CATEGORY_NAME: &str = "Tickets";

pub const DEFAULT_COMMAND_PREFIX: &str = "!";

/// How often the presence rotator swaps the activity text.
pub const PRESENCE_ROTATE_SECONDS: u64 = 20;

/// Format a wait in seconds as "3h 12m" / "12m 5s" / "42s" for cooldown
/// messages.
pub fn format_wait(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);

    if total_secs >= 3600 {
        format!("{}h {}m", total_secs / 3600, (total_secs % 3600) / 60)
    } else if total_secs >= 60 {
        format!("{}m {}s", total_secs / 60, total_secs % 60)
    } else {
        format!("{}s", total_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_wait() {
        assert_eq!(format_wait(42), "42s");
        assert_eq!(format_wait(125), "2m 5s");
        assert_eq!(format_wait(3 * 3600 + 12 * 60 + 59), "3h 12m");
        // Negative waits (clock skew) render as zero rather than wrapping
        assert_eq!(format_wait(-5), "0s");
    }
}
