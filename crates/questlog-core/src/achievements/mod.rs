//! Achievement catalog and matcher.
//!
//! Achievements are a static rule table; unlock records live in storage.
//! The matcher compares a stats snapshot against every rule not yet
//! unlocked and returns all newly qualifying entries in catalog order, so
//! one large grant can unlock several tiers at once.

mod catalog;

use serde::{Deserialize, Serialize};

pub use catalog::CATALOG;

/// What a rule's threshold is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Streak,
    Xp,
    Level,
    GoalsCompleted,
}

/// Cosmetic tier, has no effect on matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: AchievementTier,
    pub icon: &'static str,
    pub requirement: u64,
    pub category: AchievementCategory,
}

/// Stats snapshot the matcher evaluates.
///
/// `experience` is the lifetime total, not the current level's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub current_streak: u32,
    pub experience: u64,
    pub level: u32,
    pub goals_completed: u64,
}

/// Look up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.id == id)
}

/// Return every achievement the stats now qualify for that is not already
/// unlocked, in catalog order. Already-unlocked ids are never re-emitted.
pub fn check_new_achievements(
    stats: &UserStats,
    unlocked_ids: &[String],
) -> Vec<&'static Achievement> {
    CATALOG
        .iter()
        .filter(|a| !unlocked_ids.iter().any(|id| id == a.id))
        .filter(|a| match a.category {
            AchievementCategory::Streak => u64::from(stats.current_streak) >= a.requirement,
            AchievementCategory::Xp => stats.experience >= a.requirement,
            AchievementCategory::Level => u64::from(stats.level) >= a.requirement,
            AchievementCategory::GoalsCompleted => stats.goals_completed >= a.requirement,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(streak: u32, xp: u64, level: u32, goals: u64) -> UserStats {
        UserStats {
            current_streak: streak,
            experience: xp,
            level,
            goals_completed: goals,
        }
    }

    #[test]
    fn test_catalog_thresholds_monotonic_per_category() {
        for category in [
            AchievementCategory::Streak,
            AchievementCategory::Xp,
            AchievementCategory::Level,
            AchievementCategory::GoalsCompleted,
        ] {
            let thresholds: Vec<u64> = CATALOG
                .iter()
                .filter(|a| a.category == category)
                .map(|a| a.requirement)
                .collect();
            assert!(
                thresholds.windows(2).all(|w| w[0] < w[1]),
                "thresholds not increasing in {:?}",
                category
            );
        }
    }

    #[test]
    fn test_catalog_ids_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            assert!(
                CATALOG.iter().skip(i + 1).all(|b| b.id != a.id),
                "duplicate id {}",
                a.id
            );
        }
    }

    #[test]
    fn test_nothing_qualifies_from_zero() {
        assert!(check_new_achievements(&stats(0, 0, 1, 0), &[]).is_empty());
    }

    #[test]
    fn test_first_goal_unlocks_first_step() {
        let unlocked = check_new_achievements(&stats(1, 10, 1, 1), &[]);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "goals_bronze");
    }

    #[test]
    fn test_already_unlocked_never_re_emitted() {
        let ids = vec!["goals_bronze".to_string()];
        let unlocked = check_new_achievements(&stats(1, 10, 1, 1), &ids);
        assert!(unlocked.is_empty());
    }

    #[test]
    fn test_large_grant_crosses_multiple_xp_tiers_at_once() {
        let unlocked = check_new_achievements(&stats(0, 800, 1, 0), &[]);
        let ids: Vec<&str> = unlocked.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["xp_bronze", "xp_bronze_2"]);
    }

    #[test]
    fn test_results_follow_catalog_order_across_categories() {
        let unlocked = check_new_achievements(&stats(3, 250, 5, 1), &[]);
        let ids: Vec<&str> = unlocked.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["streak_bronze", "xp_bronze", "level_bronze", "goals_bronze"]);
    }

    #[test]
    fn test_xp_category_uses_total_experience() {
        // Level 3 with only 50 in-level XP but 450 lifetime: the 250 XP
        // tier qualifies on the lifetime number.
        let unlocked = check_new_achievements(&stats(0, 450, 3, 0), &[]);
        assert!(unlocked.iter().any(|a| a.id == "xp_bronze"));
    }

    #[test]
    fn test_find_by_id() {
        assert_eq!(find("streak_diamond").map(|a| a.requirement), Some(365));
        assert!(find("no_such_id").is_none());
    }
}
