//! Read-side services: user profile, rankings, achievement status,
//! progress reports.
//!
//! Reads go through the in-memory read-through cache; the orchestrator's
//! invalidations keep them from going stale past the TTL bound.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::{AchievementCategory, AchievementTier, CATALOG};
use crate::cache::MemoryCache;
use crate::calendar::local_date;
use crate::error::{CoreError, Result};
use crate::stats::{progress_report, Period, ProgressReport};
use crate::storage::{Database, RankCategory, RankedUser};
use crate::user::User;

const PROFILE_TTL: Duration = Duration::from_secs(300);
const RANKING_TTL: Duration = Duration::from_secs(300);
const ACHIEVEMENTS_TTL: Duration = Duration::from_secs(600);
const PROGRESS_TTL: Duration = Duration::from_secs(600);

/// A user plus derived display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub completed_goals: u64,
    /// Streak as it should be displayed: zero once the stored streak has
    /// already expired (last interaction older than yesterday). The stored
    /// value is left untouched for the engine to reset on the next
    /// completion.
    pub effective_streak: u32,
}

/// One catalog entry with the user's unlock state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementStatus {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tier: AchievementTier,
    pub icon: String,
    pub requirement: u64,
    pub category: AchievementCategory,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Ranking page plus the requesting user's own position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResult {
    pub rankings: Vec<RankedUser>,
    pub current_user_position: Option<u64>,
    pub total_users: u64,
}

/// Read-side service over storage and the read-through cache.
pub struct ProfileService<'a> {
    db: &'a Database,
    cache: &'a MemoryCache,
    tz: FixedOffset,
}

impl<'a> ProfileService<'a> {
    pub fn new(db: &'a Database, cache: &'a MemoryCache, tz: FixedOffset) -> Self {
        Self { db, cache, tz }
    }

    /// Profile with lifetime completion count and display streak.
    pub fn profile(&self, user_id: &str) -> Result<UserProfile> {
        let key = format!("user:{user_id}");
        self.cache.get_or_compute(&key, PROFILE_TTL, || {
            let user = self
                .db
                .find_user(user_id)?
                .ok_or(CoreError::not_found("user"))?;
            let completed_goals = self.db.count_completions_by_user(user_id)?;
            let effective_streak = effective_streak(&user, Utc::now(), &self.tz);
            Ok(UserProfile {
                user,
                completed_goals,
                effective_streak,
            })
        })
    }

    /// Top-N ranking for a category plus the caller's own position.
    ///
    /// Only the cross-user page is cached; the caller's position is cheap
    /// and would poison a shared cache entry.
    pub fn ranking(
        &self,
        user_id: &str,
        category: RankCategory,
        limit: u32,
    ) -> Result<RankingResult> {
        let key = format!("ranking:{}", category.as_str());
        let rankings: Vec<RankedUser> = self
            .cache
            .get_or_compute(&key, RANKING_TTL, || Ok(self.db.ranking(category, limit)?))?;

        let current_user_position = self.db.user_rank(user_id, category)?.map(|r| r.position);
        let total_users = self.db.count_users()?;
        Ok(RankingResult {
            rankings,
            current_user_position,
            total_users,
        })
    }

    /// Full catalog annotated with the user's unlock records.
    pub fn achievements(&self, user_id: &str) -> Result<Vec<AchievementStatus>> {
        let key = format!("achievements:{user_id}");
        self.cache.get_or_compute(&key, ACHIEVEMENTS_TTL, || {
            let unlocked = self.db.find_unlocked(user_id)?;
            Ok(CATALOG
                .iter()
                .map(|a| {
                    let unlock = unlocked.iter().find(|u| u.achievement_id == a.id);
                    AchievementStatus {
                        id: a.id.to_string(),
                        title: a.title.to_string(),
                        description: a.description.to_string(),
                        tier: a.tier,
                        icon: a.icon.to_string(),
                        requirement: a.requirement,
                        category: a.category,
                        unlocked: unlock.is_some(),
                        unlocked_at: unlock.map(|u| u.unlocked_at),
                    }
                })
                .collect())
        })
    }

    /// Progress report for the given period.
    pub fn progress(&self, user_id: &str, period: Period) -> Result<ProgressReport> {
        let key = format!("progress:{user_id}:{}", period.as_str());
        self.cache.get_or_compute(&key, PROGRESS_TTL, || {
            if self.db.find_user(user_id)?.is_none() {
                return Err(CoreError::not_found("user"));
            }
            let completions = self.db.completions_with_xp(user_id)?;
            Ok(progress_report(&completions, period, Utc::now(), &self.tz))
        })
    }
}

/// Streak value for display: zero once the last interaction is older than
/// yesterday. Stricter than the engine's grace rule on purpose; storage
/// keeps the stale value for the engine to resolve on the next completion.
fn effective_streak<Tz: chrono::TimeZone>(user: &User, now: DateTime<Utc>, tz: &Tz) -> u32 {
    let Some(last) = user.last_interaction_date else {
        return user.current_streak;
    };
    let last_day = local_date(last, tz);
    let yesterday = local_date(now, tz) - chrono::Duration::days(1);
    if last_day < yesterday {
        0
    } else {
        user.current_streak
    }
}
