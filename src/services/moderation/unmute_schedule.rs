use dashmap::DashMap;

/// One armed automatic unmute per (guild, user).
///
/// Overlapping timed mutes coalesce instead of stacking: arming again bumps
/// the generation, and a timer that wakes up holding a stale token finds the
/// generation moved on and does nothing. The newest timer always owns the
/// unmute, so a fresh burst can never be cut short by an earlier timer.
pub struct UnmuteSchedule {
    timers: DashMap<(u64, u64), Timer>,
}

struct Timer {
    generation: u64,
    role_id: u64,
}

impl UnmuteSchedule {
    pub fn new() -> Self {
        Self {
            timers: DashMap::new(),
        }
    }

    /// Arm (or re-arm) the unmute for a user, invalidating any earlier timer.
    /// Returns the token the new timer must present on completion.
    pub fn arm(&self, guild_id: u64, user_id: u64, role_id: u64) -> u64 {
        let mut entry = self.timers.entry((guild_id, user_id)).or_insert(Timer {
            generation: 0,
            role_id,
        });
        entry.generation += 1;
        entry.role_id = role_id;
        entry.generation
    }

    /// Re-arm only if a timer is already armed. Returns the new token and the
    /// mute role it guards, or None when the user is not under a timed mute.
    pub fn refresh(&self, guild_id: u64, user_id: u64) -> Option<(u64, u64)> {
        let mut entry = self.timers.get_mut(&(guild_id, user_id))?;
        entry.generation += 1;
        Some((entry.generation, entry.role_id))
    }

    /// Called by a timer when it fires. Clears the schedule and returns true
    /// only if no newer timer has been armed since `token` was issued.
    pub fn complete(&self, guild_id: u64, user_id: u64, token: u64) -> bool {
        self.timers
            .remove_if(&(guild_id, user_id), |_, timer| timer.generation == token)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }
}

impl Default for UnmuteSchedule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_and_completing_clears_the_timer() {
        let schedule = UnmuteSchedule::new();

        let token = schedule.arm(1, 2, 99);
        assert_eq!(schedule.len(), 1);

        assert!(schedule.complete(1, 2, token));
        assert_eq!(schedule.len(), 0);
    }

    #[test]
    fn stale_timer_loses_to_a_newer_arm() {
        let schedule = UnmuteSchedule::new();

        let first = schedule.arm(1, 2, 99);
        let second = schedule.arm(1, 2, 99);
        assert_ne!(first, second);

        // The earlier timer fires first and must not unmute
        assert!(!schedule.complete(1, 2, first));
        assert_eq!(schedule.len(), 1);

        // The newest timer still owns the unmute
        assert!(schedule.complete(1, 2, second));
        assert_eq!(schedule.len(), 0);
    }

    #[test]
    fn refresh_extends_without_creating_a_second_timer() {
        let schedule = UnmuteSchedule::new();

        // Nothing armed yet: refresh has nothing to extend
        assert_eq!(schedule.refresh(1, 2), None);

        let first = schedule.arm(1, 2, 99);
        let (second, role_id) = schedule.refresh(1, 2).expect("armed");
        assert_eq!(role_id, 99);
        assert_eq!(schedule.len(), 1);

        assert!(!schedule.complete(1, 2, first));
        assert!(schedule.complete(1, 2, second));
    }

    #[test]
    fn users_are_scheduled_independently() {
        let schedule = UnmuteSchedule::new();

        let a = schedule.arm(1, 2, 99);
        let b = schedule.arm(1, 3, 99);

        assert!(schedule.complete(1, 2, a));
        assert_eq!(schedule.len(), 1);
        assert!(schedule.complete(1, 3, b));
    }
}
