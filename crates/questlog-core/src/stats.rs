//! Progress reporting over completion history.
//!
//! Pure functions over `(completed_at, xp_reward)` rows fetched once from
//! storage. The weekly prune means history may never extend past one prior
//! week; the report tolerates that by showing only the days that exist.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::local_date;

/// Reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "30d")]
    Days30,
    #[serde(rename = "90d")]
    Days90,
    All,
}

impl Period {
    /// Maximum number of days shown for this period.
    pub fn days(self) -> i64 {
        match self {
            Period::Days7 => 7,
            Period::Days30 => 30,
            Period::Days90 => 90,
            Period::All => 180,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Days7 => "7d",
            Period::Days30 => "30d",
            Period::Days90 => "90d",
            Period::All => "all",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Period::Days7),
            "30d" => Ok(Period::Days30),
            "90d" => Ok(Period::Days90),
            "all" => Ok(Period::All),
            other => Err(format!("unknown period: {other} (expected 7d, 30d, 90d, all)")),
        }
    }
}

/// Cumulative XP on one day. The level here is a coarse display value
/// derived from cumulative XP alone, not the engine's level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpPoint {
    pub date: NaiveDate,
    pub xp: u64,
    pub level: u32,
}

/// Consecutive-completion-day count as of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakPoint {
    pub date: NaiveDate,
    pub streak: u32,
}

/// Completions inside one trailing 7-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week_start: NaiveDate,
    pub completed: u64,
    pub target: u64,
}

/// Full progress report for one user and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub xp_history: Vec<XpPoint>,
    pub streak_history: Vec<StreakPoint>,
    pub weekly: Vec<WeekSummary>,
}

/// Build a progress report from completion rows (oldest first).
pub fn progress_report<Tz: TimeZone>(
    completions: &[(DateTime<Utc>, u32)],
    period: Period,
    now: DateTime<Utc>,
    tz: &Tz,
) -> ProgressReport {
    let today = local_date(now, tz);

    let mut xp_by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for (completed_at, xp_reward) in completions {
        *xp_by_day.entry(local_date(*completed_at, tz)).or_insert(0) +=
            u64::from(*xp_reward);
    }

    // Show only days since the first completion, capped by the period.
    let first_day = completions
        .first()
        .map(|(at, _)| local_date(*at, tz))
        .unwrap_or(today);
    let days_since_first = (today - first_day).num_days().max(0);
    let days_to_show = (days_since_first + 1).min(period.days());

    let mut xp_history = Vec::with_capacity(days_to_show as usize);
    let mut streak_history = Vec::with_capacity(days_to_show as usize);
    let mut cumulative_xp = 0u64;
    let mut running_streak = 0u32;

    for offset in (0..days_to_show).rev() {
        let date = today - Duration::days(offset);
        let day_xp = xp_by_day.get(&date).copied().unwrap_or(0);
        cumulative_xp += day_xp;

        let level = (cumulative_xp / 100 + 1).max(1) as u32;
        xp_history.push(XpPoint {
            date,
            xp: cumulative_xp,
            level,
        });

        if xp_by_day.contains_key(&date) {
            running_streak += 1;
        } else {
            running_streak = 0;
        }
        streak_history.push(StreakPoint {
            date,
            streak: running_streak,
        });
    }

    // Trailing 7-day buckets ending today, oldest first.
    let week_count = (days_to_show + 6) / 7;
    let mut weekly = Vec::with_capacity(week_count as usize);
    for i in (0..week_count).rev() {
        let week_start = today - Duration::days(i * 7);
        let week_end = week_start + Duration::days(7);
        let completed = completions
            .iter()
            .filter(|(at, _)| {
                let day = local_date(*at, tz);
                day >= week_start && day < week_end
            })
            .count() as u64;
        weekly.push(WeekSummary {
            week_start,
            completed,
            target: completed.max(5),
        });
    }

    ProgressReport {
        xp_history,
        streak_history,
        weekly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn now() -> DateTime<Utc> {
        utc("2024-06-12T15:00:00Z")
    }

    #[test]
    fn test_empty_history_has_single_day() {
        let report = progress_report(&[], Period::Days30, now(), &Utc);
        assert_eq!(report.xp_history.len(), 1);
        assert_eq!(report.xp_history[0].xp, 0);
        assert_eq!(report.streak_history[0].streak, 0);
        assert_eq!(report.weekly.len(), 1);
    }

    #[test]
    fn test_cumulative_xp_and_display_level() {
        let completions = vec![
            (utc("2024-06-10T10:00:00Z"), 50),
            (utc("2024-06-11T10:00:00Z"), 50),
            (utc("2024-06-12T10:00:00Z"), 20),
        ];
        let report = progress_report(&completions, Period::Days30, now(), &Utc);
        assert_eq!(report.xp_history.len(), 3);
        assert_eq!(report.xp_history[0].xp, 50);
        assert_eq!(report.xp_history[1].xp, 100);
        assert_eq!(report.xp_history[2].xp, 120);
        assert_eq!(report.xp_history[2].level, 2);
    }

    #[test]
    fn test_streak_history_resets_on_gap() {
        let completions = vec![
            (utc("2024-06-09T10:00:00Z"), 10),
            (utc("2024-06-10T10:00:00Z"), 10),
            // gap on the 11th
            (utc("2024-06-12T10:00:00Z"), 10),
        ];
        let report = progress_report(&completions, Period::Days30, now(), &Utc);
        let streaks: Vec<u32> = report.streak_history.iter().map(|p| p.streak).collect();
        assert_eq!(streaks, vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_period_caps_days_shown() {
        let completions = vec![(utc("2024-04-01T10:00:00Z"), 10)];
        let report = progress_report(&completions, Period::Days7, now(), &Utc);
        assert_eq!(report.xp_history.len(), 7);
    }

    #[test]
    fn test_same_day_completions_accumulate() {
        let completions = vec![
            (utc("2024-06-12T08:00:00Z"), 10),
            (utc("2024-06-12T18:00:00Z"), 35),
        ];
        let report = progress_report(&completions, Period::Days7, now(), &Utc);
        assert_eq!(report.xp_history.last().map(|p| p.xp), Some(45));
    }

    #[test]
    fn test_weekly_target_floors_at_five() {
        let completions = vec![(utc("2024-06-12T08:00:00Z"), 10)];
        let report = progress_report(&completions, Period::Days7, now(), &Utc);
        assert_eq!(report.weekly[0].completed, 1);
        assert_eq!(report.weekly[0].target, 5);
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("7d".parse::<Period>().unwrap(), Period::Days7);
        assert_eq!("all".parse::<Period>().unwrap(), Period::All);
        assert!("14d".parse::<Period>().is_err());
    }
}
