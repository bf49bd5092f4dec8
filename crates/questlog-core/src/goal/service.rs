//! Goal completion orchestrator.
//!
//! Ties the pure engines (XP, streak, achievement matcher) to storage and
//! cache invalidation as one logical transaction per request. Dependencies
//! are injected so tests can swap in an in-memory database and cache.

use chrono::{DateTime, FixedOffset, Utc};
use tracing::warn;

use crate::achievements::{self, UserStats};
use crate::cache::CacheSink;
use crate::calendar::{local_date, start_of_week};
use crate::error::{CoreError, DatabaseError, Result, ValidationError};
use crate::gamification::{add_xp, calculate_streak, remove_xp, xp_reward_for_frequency};
use crate::goal::{CompletionOutcome, DeleteGoalOutcome, Goal, GoalPatch, GoalProgress, NewGoal};
use crate::storage::Database;
use crate::user::{GamificationUpdate, User};

/// Orchestrator for all goal mutations.
pub struct GoalService<'a> {
    db: &'a Database,
    cache: &'a dyn CacheSink,
    tz: FixedOffset,
}

impl<'a> GoalService<'a> {
    pub fn new(db: &'a Database, cache: &'a dyn CacheSink, tz: FixedOffset) -> Self {
        Self { db, cache, tz }
    }

    /// Create a goal, freezing its XP reward from the frequency table.
    pub fn create_goal(&self, user_id: &str, new_goal: &NewGoal) -> Result<Goal> {
        validate_frequency(new_goal.desired_weekly_frequency)?;
        let xp_reward = xp_reward_for_frequency(new_goal.desired_weekly_frequency);
        let goal = self.db.create_goal(
            user_id,
            &new_goal.title,
            new_goal.desired_weekly_frequency,
            xp_reward,
            Utc::now(),
        )?;

        if let Err(e) = self.cache.invalidate_progress(user_id) {
            warn!(user_id, error = %e, "progress cache invalidation failed");
        }
        Ok(goal)
    }

    /// Patch a goal. Editing the frequency recomputes the frozen reward;
    /// past completions keep the value that was active when XP was granted.
    pub fn update_goal(&self, goal_id: &str, user_id: &str, patch: &GoalPatch) -> Result<Goal> {
        let mut goal = self
            .db
            .find_goal(goal_id, user_id)?
            .ok_or(CoreError::not_found("goal"))?;

        if let Some(title) = &patch.title {
            goal.title = title.clone();
        }
        if let Some(frequency) = patch.desired_weekly_frequency {
            validate_frequency(frequency)?;
            goal.desired_weekly_frequency = frequency;
            goal.xp_reward = xp_reward_for_frequency(frequency);
        }
        goal.updated_at = Utc::now();
        self.db.update_goal(&goal)?;

        if let Err(e) = self.cache.invalidate_progress(user_id) {
            warn!(user_id, error = %e, "progress cache invalidation failed");
        }
        Ok(goal)
    }

    /// Delete a goal, reversing XP for this week's completions only.
    ///
    /// Completions from earlier weeks were already banked by the weekly
    /// reset; their XP stays. All completion records go regardless.
    pub fn delete_goal(&self, goal_id: &str, user_id: &str) -> Result<DeleteGoalOutcome> {
        let now = Utc::now();
        let goal = self
            .db
            .find_goal(goal_id, user_id)?
            .ok_or(CoreError::not_found("goal"))?;

        let week_start = start_of_week(now, &self.tz);
        let completions = self.db.completions_for_goal(goal_id, user_id)?;
        let in_week = completions
            .iter()
            .filter(|c| c.completed_at >= week_start)
            .count() as u64;
        let xp_lost = in_week * u64::from(goal.xp_reward);

        if xp_lost > 0 {
            let user = self.load_user(user_id)?;
            let xp = remove_xp(user.xp_state(), xp_lost);
            self.db
                .update_gamification(user_id, &GamificationUpdate::from_xp(xp))?;
        }

        let completions_deleted = self.db.delete_completions_for_goal(goal_id)?;
        self.db.delete_goal(goal_id)?;

        self.invalidate_goal_caches(user_id);
        Ok(DeleteGoalOutcome {
            xp_lost,
            completions_deleted,
        })
    }

    /// Toggle a goal's completion for today.
    ///
    /// Toggle-off deletes today's completion and revokes its XP; streak and
    /// achievements are deliberately not reconsidered. Toggle-on enforces
    /// the weekly quota, then grants XP, advances the streak, and unlocks
    /// any newly qualifying achievements.
    pub fn complete_goal(&self, goal_id: &str, user_id: &str) -> Result<CompletionOutcome> {
        let now = Utc::now();
        let goal = self
            .db
            .find_goal(goal_id, user_id)?
            .ok_or(CoreError::not_found("goal"))?;

        let today = local_date(now, &self.tz);
        if let Some(existing) = self.db.find_completion_on_day(goal_id, user_id, today)? {
            return self.toggle_off(&goal, user_id, &existing.id);
        }
        self.toggle_on(&goal, user_id, now)
    }

    /// Goals with their progress inside the current week.
    pub fn list_goals(&self, user_id: &str) -> Result<Vec<GoalProgress>> {
        let week_start = start_of_week(Utc::now(), &self.tz);
        Ok(self.db.list_goals_with_week_counts(user_id, week_start)?)
    }

    fn toggle_off(&self, goal: &Goal, user_id: &str, completion_id: &str) -> Result<CompletionOutcome> {
        self.db.delete_completion(completion_id)?;

        let user = self.load_user(user_id)?;
        let xp = remove_xp(user.xp_state(), u64::from(goal.xp_reward));
        self.db
            .update_gamification(user_id, &GamificationUpdate::from_xp(xp))?;

        self.invalidate_goal_caches(user_id);
        Ok(CompletionOutcome::Reverted {
            xp_lost: goal.xp_reward,
        })
    }

    fn toggle_on(
        &self,
        goal: &Goal,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CompletionOutcome> {
        let week_start = start_of_week(now, &self.tz);
        let this_week = self
            .db
            .count_week_completions(&goal.id, user_id, week_start)?;
        if this_week >= u64::from(goal.desired_weekly_frequency) {
            return Err(CoreError::QuotaExceeded(
                "You have already completed this goal the maximum number of times this week!"
                    .to_string(),
            ));
        }

        let today = local_date(now, &self.tz);
        match self.db.create_completion(&goal.id, user_id, now, today) {
            Ok(_) => {}
            Err(DatabaseError::Duplicate(_)) => {
                // Lost the race against a concurrent toggle-on.
                return Err(CoreError::PreconditionFailed(
                    "goal already completed today".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        let user = self.load_user(user_id)?;
        let streak = calculate_streak(
            user.last_interaction_date,
            user.current_streak,
            user.longest_streak,
            now,
            &self.tz,
        );
        let xp = add_xp(user.xp_state(), u64::from(goal.xp_reward));
        self.db
            .update_gamification(user_id, &GamificationUpdate::with_streak(xp, &streak, now))?;

        let goals_completed = self.db.count_completions_by_user(user_id)?;
        let unlocked_ids: Vec<String> = self
            .db
            .find_unlocked(user_id)?
            .into_iter()
            .map(|u| u.achievement_id)
            .collect();
        let stats = UserStats {
            current_streak: streak.current_streak,
            experience: xp.total_experience,
            level: xp.level,
            goals_completed,
        };
        let new_achievements = achievements::check_new_achievements(&stats, &unlocked_ids);

        // Unlock persistence is best-effort: a failure here must not roll
        // back the XP/streak update already committed.
        for achievement in &new_achievements {
            if let Err(e) = self.db.unlock_achievement(user_id, achievement.id, now) {
                warn!(user_id, achievement = achievement.id, error = %e,
                      "achievement unlock failed");
            }
        }

        self.invalidate_goal_caches(user_id);
        Ok(CompletionOutcome::Completed {
            xp_gained: goal.xp_reward,
            new_streak: streak.current_streak,
            achievements_unlocked: new_achievements,
        })
    }

    fn load_user(&self, user_id: &str) -> Result<User> {
        self.db
            .find_user(user_id)?
            .ok_or(CoreError::not_found("user"))
    }

    fn invalidate_goal_caches(&self, user_id: &str) {
        if let Err(e) = self.cache.invalidate_goal_caches(user_id) {
            warn!(user_id, error = %e, "cache invalidation failed");
        }
    }
}

fn validate_frequency(frequency: u8) -> Result<()> {
    if (1..=7).contains(&frequency) {
        return Ok(());
    }
    Err(ValidationError::InvalidValue {
        field: "desired_weekly_frequency".to_string(),
        message: format!("must be between 1 and 7, got {frequency}"),
    }
    .into())
}
