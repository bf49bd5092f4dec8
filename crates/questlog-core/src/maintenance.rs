//! Scheduled maintenance logic.
//!
//! The scheduler itself lives outside this crate; these functions hold the
//! logic its jobs run.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{day_bounds, start_of_last_week};
use crate::error::Result;
use crate::storage::Database;

/// Outcome of the weekly reset prune.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyResetSummary {
    /// Completions strictly before this instant were deleted.
    pub cutoff: DateTime<Utc>,
    pub deleted: u64,
}

/// A user one idle day away from losing their streak.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakAtRisk {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub current_streak: u32,
}

/// Weekly reset: delete completions from before the previous Sunday.
///
/// Meant to run Monday 00:00, right after a week closes. The current
/// week's completions always survive; when run on a Sunday the cutoff
/// steps back a full week so the just-started week is not emptied.
pub fn reset_weekly_completions<Tz: TimeZone>(
    db: &Database,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<WeeklyResetSummary> {
    let cutoff = start_of_last_week(now, tz);
    let deleted = db.prune_completions_before(cutoff)?;
    Ok(WeeklyResetSummary { cutoff, deleted })
}

/// Users whose last interaction was yesterday and whose streak is alive.
/// One more idle day and the streak resets; callers typically notify them.
pub fn streaks_at_risk<Tz: TimeZone>(
    db: &Database,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<Vec<StreakAtRisk>> {
    let (start, end) = day_bounds(now - Duration::days(1), tz);
    let users = db.users_with_streak_at_risk(start, end)?;
    Ok(users
        .into_iter()
        .map(|u| StreakAtRisk {
            user_id: u.id,
            name: u.name,
            email: u.email,
            current_streak: u.current_streak,
        })
        .collect())
}
