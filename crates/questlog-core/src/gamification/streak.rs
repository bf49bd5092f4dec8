//! Daily streak continuity.
//!
//! A streak advances on the first completion of each day and tolerates a
//! single missed day: after one gap the streak holds (grace), after two it
//! resets. Comparisons are at day granularity in the caller's timezone.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::local_date;

/// Outcome of a streak evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakOutcome {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// When false the caller must not touch streak fields or the last
    /// interaction date (the day was already counted).
    pub should_update: bool,
}

/// Evaluate the streak for a forward completion happening at `now`.
///
/// Only called on the toggle-on path; undoing a completion never rewinds
/// streak state.
///
/// - no prior interaction: start at 1
/// - last interaction today: unchanged, `should_update = false`
/// - yesterday: increment, longest raised to match
/// - day before yesterday: grace, value held but the interaction date
///   still advances to today
/// - older, or future-dated: reset to 1, longest preserved
pub fn calculate_streak<Tz: TimeZone>(
    last_interaction_date: Option<DateTime<Utc>>,
    current_streak: u32,
    longest_streak: u32,
    now: DateTime<Utc>,
    tz: &Tz,
) -> StreakOutcome {
    let Some(last) = last_interaction_date else {
        return StreakOutcome {
            current_streak: 1,
            longest_streak: longest_streak.max(1),
            should_update: true,
        };
    };

    let today = local_date(now, tz);
    let last_day = local_date(last, tz);

    if last_day == today {
        return StreakOutcome {
            current_streak,
            longest_streak,
            should_update: false,
        };
    }

    if last_day == today - Duration::days(1) {
        let new_streak = current_streak + 1;
        return StreakOutcome {
            current_streak: new_streak,
            longest_streak: new_streak.max(longest_streak),
            should_update: true,
        };
    }

    if last_day == today - Duration::days(2) {
        // Grace day: hold the value but advance lastInteractionDate so a
        // completion today keeps the streak alive.
        return StreakOutcome {
            current_streak,
            longest_streak,
            should_update: true,
        };
    }

    StreakOutcome {
        current_streak: 1,
        longest_streak,
        should_update: true,
    }
}
