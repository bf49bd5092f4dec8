//! Integration tests for the read side and the maintenance jobs.

use chrono::{Duration, FixedOffset, Utc};
use questlog_core::cache::MemoryCache;
use questlog_core::goal::NewGoal;
use questlog_core::maintenance::{reset_weekly_completions, streaks_at_risk};
use questlog_core::storage::RankCategory;
use questlog_core::user::GamificationUpdate;
use questlog_core::{CoreError, Database, GoalService, Period, ProfileService};

fn utc_offset() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn setup() -> (Database, MemoryCache) {
    (Database::open_memory().unwrap(), MemoryCache::new())
}

#[test]
fn test_profile_reflects_completions() {
    let (db, cache) = setup();
    let goals = GoalService::new(&db, &cache, utc_offset());
    let profiles = ProfileService::new(&db, &cache, utc_offset());

    let user = db.create_user("Ada", "ada@example.com").unwrap();
    let goal = goals
        .create_goal(
            &user.id,
            &NewGoal {
                title: "Read".to_string(),
                desired_weekly_frequency: 3,
            },
        )
        .unwrap();
    goals.complete_goal(&goal.id, &user.id).unwrap();

    let profile = profiles.profile(&user.id).unwrap();
    assert_eq!(profile.completed_goals, 1);
    assert_eq!(profile.effective_streak, 1);
    assert_eq!(profile.user.total_experience, 20);
}

#[test]
fn test_profile_unknown_user_is_not_found() {
    let (db, cache) = setup();
    let profiles = ProfileService::new(&db, &cache, utc_offset());
    assert!(matches!(
        profiles.profile("nope"),
        Err(CoreError::NotFound { entity: "user" })
    ));
}

#[test]
fn test_ranking_includes_caller_position_and_totals() {
    let (db, cache) = setup();
    let profiles = ProfileService::new(&db, &cache, utc_offset());

    let a = db.create_user("Ada", "ada@example.com").unwrap();
    let b = db.create_user("Bob", "bob@example.com").unwrap();
    db.update_gamification(
        &b.id,
        &GamificationUpdate {
            experience: 90,
            total_experience: 90,
            level: 1,
            experience_to_next_level: 100,
            current_streak: None,
            longest_streak: None,
            last_interaction_date: None,
        },
    )
    .unwrap();

    let result = profiles.ranking(&a.id, RankCategory::Xp, 10).unwrap();
    assert_eq!(result.total_users, 2);
    assert_eq!(result.rankings.len(), 2);
    assert_eq!(result.rankings[0].id, b.id);
    assert_eq!(result.current_user_position, Some(2));

    // The cached page is shared; the position is recomputed per caller.
    let for_b = profiles.ranking(&b.id, RankCategory::Xp, 10).unwrap();
    assert_eq!(for_b.current_user_position, Some(1));
}

#[test]
fn test_achievement_status_covers_whole_catalog() {
    let (db, cache) = setup();
    let goals = GoalService::new(&db, &cache, utc_offset());
    let profiles = ProfileService::new(&db, &cache, utc_offset());

    let user = db.create_user("Ada", "ada@example.com").unwrap();
    let goal = goals
        .create_goal(
            &user.id,
            &NewGoal {
                title: "Read".to_string(),
                desired_weekly_frequency: 3,
            },
        )
        .unwrap();
    goals.complete_goal(&goal.id, &user.id).unwrap();

    let statuses = profiles.achievements(&user.id).unwrap();
    assert_eq!(statuses.len(), 32);
    let unlocked: Vec<&str> = statuses
        .iter()
        .filter(|s| s.unlocked)
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(unlocked, vec!["goals_bronze"]);
    assert!(statuses.iter().all(|s| s.unlocked == s.unlocked_at.is_some()));
}

#[test]
fn test_progress_report_for_fresh_history() {
    let (db, cache) = setup();
    let goals = GoalService::new(&db, &cache, utc_offset());
    let profiles = ProfileService::new(&db, &cache, utc_offset());

    let user = db.create_user("Ada", "ada@example.com").unwrap();
    let goal = goals
        .create_goal(
            &user.id,
            &NewGoal {
                title: "Read".to_string(),
                desired_weekly_frequency: 3,
            },
        )
        .unwrap();
    goals.complete_goal(&goal.id, &user.id).unwrap();

    let report = profiles.progress(&user.id, Period::Days7).unwrap();
    assert_eq!(report.xp_history.len(), 1);
    assert_eq!(report.xp_history[0].xp, 20);
    assert_eq!(report.streak_history[0].streak, 1);
}

#[test]
fn test_weekly_reset_prunes_past_weeks_only() {
    let (db, cache) = setup();
    let goals = GoalService::new(&db, &cache, utc_offset());

    let user = db.create_user("Ada", "ada@example.com").unwrap();
    let goal = goals
        .create_goal(
            &user.id,
            &NewGoal {
                title: "Read".to_string(),
                desired_weekly_frequency: 3,
            },
        )
        .unwrap();

    let now = Utc::now();
    goals.complete_goal(&goal.id, &user.id).unwrap();
    let old = now - Duration::days(21);
    db.create_completion(&goal.id, &user.id, old, old.date_naive())
        .unwrap();

    let summary = reset_weekly_completions(&db, now, &Utc).unwrap();
    assert_eq!(summary.deleted, 1);
    assert_eq!(db.count_completions_by_user(&user.id).unwrap(), 1);

    // Second run is a no-op.
    let summary = reset_weekly_completions(&db, now, &Utc).unwrap();
    assert_eq!(summary.deleted, 0);
}

#[test]
fn test_streaks_at_risk_flags_yesterday_only() {
    let (db, _cache) = setup();
    let now = Utc::now();

    let yesterday_user = db.create_user("Ada", "ada@example.com").unwrap();
    db.update_gamification(
        &yesterday_user.id,
        &GamificationUpdate {
            experience: 10,
            total_experience: 10,
            level: 1,
            experience_to_next_level: 100,
            current_streak: Some(4),
            longest_streak: Some(4),
            last_interaction_date: Some(now - Duration::days(1)),
        },
    )
    .unwrap();

    let today_user = db.create_user("Bob", "bob@example.com").unwrap();
    db.update_gamification(
        &today_user.id,
        &GamificationUpdate {
            experience: 10,
            total_experience: 10,
            level: 1,
            experience_to_next_level: 100,
            current_streak: Some(2),
            longest_streak: Some(2),
            last_interaction_date: Some(now),
        },
    )
    .unwrap();

    let stale_user = db.create_user("Cleo", "cleo@example.com").unwrap();
    db.update_gamification(
        &stale_user.id,
        &GamificationUpdate {
            experience: 10,
            total_experience: 10,
            level: 1,
            experience_to_next_level: 100,
            current_streak: Some(9),
            longest_streak: Some(9),
            last_interaction_date: Some(now - Duration::days(3)),
        },
    )
    .unwrap();

    let at_risk = streaks_at_risk(&db, now, &Utc).unwrap();
    assert_eq!(at_risk.len(), 1);
    assert_eq!(at_risk[0].user_id, yesterday_user.id);
    assert_eq!(at_risk[0].current_streak, 4);
}
