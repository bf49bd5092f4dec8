//! Weekly goals, completions, and the completion orchestrator.

pub mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;

pub use service::GoalService;

/// A weekly goal owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// How many times per week the goal should be completed (1-7).
    pub desired_weekly_frequency: u8,
    /// XP granted per completion. Derived from the frequency when the goal
    /// is created or edited, then frozen on the record.
    pub xp_reward: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One day's fulfillment of a goal. At most one exists per goal per
/// calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalCompletion {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for goal creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,
    pub desired_weekly_frequency: u8,
}

/// Partial update for an existing goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub desired_weekly_frequency: Option<u8>,
}

/// A goal together with its progress inside the current week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub completions_this_week: u64,
}

/// Result of toggling a goal's completion for today.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// A completion was created and XP granted.
    Completed {
        xp_gained: u32,
        new_streak: u32,
        achievements_unlocked: Vec<&'static Achievement>,
    },
    /// Today's completion was removed and its XP revoked.
    Reverted { xp_lost: u32 },
}

/// Result of deleting a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGoalOutcome {
    /// XP removed for completions inside the current week. Older
    /// completions were already banked by prior weekly resets and do not
    /// affect XP.
    pub xp_lost: u64,
    pub completions_deleted: u64,
}
