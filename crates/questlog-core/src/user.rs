//! User account with gamification state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::{StreakOutcome, XpState};

/// A user and their gamification fields.
///
/// `longest_streak >= current_streak` at all times, and `experience` stays
/// below `experience_to_next_level` after every recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub level: u32,
    pub experience: u64,
    pub total_experience: u64,
    pub experience_to_next_level: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Timestamp of the last goal completion, None for fresh accounts.
    pub last_interaction_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Snapshot of the XP/level fields for the engines.
    pub fn xp_state(&self) -> XpState {
        XpState {
            experience: self.experience,
            total_experience: self.total_experience,
            level: self.level,
            experience_to_next_level: self.experience_to_next_level,
        }
    }
}

/// Partial gamification update persisted after a completion toggles.
///
/// XP fields are always written; streak fields only when the streak engine
/// said `should_update` (so a second completion on the same day leaves the
/// streak and interaction date alone).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationUpdate {
    pub experience: u64,
    pub total_experience: u64,
    pub level: u32,
    pub experience_to_next_level: u64,
    pub current_streak: Option<u32>,
    pub longest_streak: Option<u32>,
    pub last_interaction_date: Option<DateTime<Utc>>,
}

impl GamificationUpdate {
    /// Update carrying only XP/level fields (toggle-off and goal deletion).
    pub fn from_xp(xp: XpState) -> Self {
        Self {
            experience: xp.experience,
            total_experience: xp.total_experience,
            level: xp.level,
            experience_to_next_level: xp.experience_to_next_level,
            current_streak: None,
            longest_streak: None,
            last_interaction_date: None,
        }
    }

    /// Update combining an XP result with a streak outcome; streak fields
    /// are included only when the outcome asks for it.
    pub fn with_streak(xp: XpState, streak: &StreakOutcome, now: DateTime<Utc>) -> Self {
        let mut update = Self::from_xp(xp);
        if streak.should_update {
            update.current_streak = Some(streak.current_streak);
            update.longest_streak = Some(streak.longest_streak);
            update.last_interaction_date = Some(now);
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::xp_for_next_level;

    fn xp() -> XpState {
        XpState {
            experience: 10,
            total_experience: 110,
            level: 2,
            experience_to_next_level: xp_for_next_level(2),
        }
    }

    #[test]
    fn test_from_xp_leaves_streak_untouched() {
        let update = GamificationUpdate::from_xp(xp());
        assert!(update.current_streak.is_none());
        assert!(update.last_interaction_date.is_none());
        assert_eq!(update.experience, 10);
    }

    #[test]
    fn test_with_streak_honors_should_update() {
        let now = Utc::now();
        let held = StreakOutcome {
            current_streak: 5,
            longest_streak: 5,
            should_update: false,
        };
        let update = GamificationUpdate::with_streak(xp(), &held, now);
        assert!(update.current_streak.is_none());

        let advanced = StreakOutcome {
            current_streak: 6,
            longest_streak: 6,
            should_update: true,
        };
        let update = GamificationUpdate::with_streak(xp(), &advanced, now);
        assert_eq!(update.current_streak, Some(6));
        assert_eq!(update.last_interaction_date, Some(now));
    }
}
