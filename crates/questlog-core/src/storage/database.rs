//! SQLite-backed repository for users, goals, completions, and unlocks.
//!
//! All timestamps are stored as RFC 3339 UTC strings, which makes range
//! queries plain lexicographic comparisons. `completed_day` carries the
//! calendar day in the configured anchor timezone and backs the per-day
//! uniqueness constraint.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{data_dir, migrations};
use crate::error::DatabaseError;
use crate::goal::{Goal, GoalCompletion, GoalProgress};
use crate::user::{GamificationUpdate, User};

/// An unlock record: (user, achievement) pairs are append-only and unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
}

/// Ranking sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankCategory {
    Xp,
    Level,
    Streak,
}

impl RankCategory {
    fn order_clause(self) -> &'static str {
        match self {
            RankCategory::Streak => "u.current_streak DESC, u.experience DESC",
            RankCategory::Level => "u.level DESC, u.experience DESC",
            RankCategory::Xp => "u.experience DESC, u.level DESC",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RankCategory::Xp => "xp",
            RankCategory::Level => "level",
            RankCategory::Streak => "streak",
        }
    }
}

impl std::str::FromStr for RankCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xp" => Ok(RankCategory::Xp),
            "level" => Ok(RankCategory::Level),
            "streak" => Ok(RankCategory::Streak),
            other => Err(format!("unknown ranking category: {other}")),
        }
    }
}

/// One ranking row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedUser {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub current_streak: u32,
    pub completed_goals: u64,
    pub position: u64,
}

/// SQLite database holding all persistent state.
pub struct Database {
    conn: Connection,
}

fn parse_timestamp(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn map_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let last_raw: Option<String> = row.get("last_interaction_date")?;
    let last_interaction_date = match last_raw {
        Some(raw) => Some(parse_timestamp(&raw)?),
        None => None,
    };
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        level: row.get("level")?,
        experience: row.get("experience")?,
        total_experience: row.get("total_experience")?,
        experience_to_next_level: row.get("experience_to_next_level")?,
        current_streak: row.get("current_streak")?,
        longest_streak: row.get("longest_streak")?,
        last_interaction_date,
        created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
        updated_at: parse_timestamp(&row.get::<_, String>("updated_at")?)?,
    })
}

fn map_goal(row: &rusqlite::Row<'_>) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        desired_weekly_frequency: row.get("desired_weekly_frequency")?,
        xp_reward: row.get("xp_reward")?,
        created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
        updated_at: parse_timestamp(&row.get::<_, String>("updated_at")?)?,
    })
}

fn map_completion(row: &rusqlite::Row<'_>) -> rusqlite::Result<GoalCompletion> {
    Ok(GoalCompletion {
        id: row.get("id")?,
        goal_id: row.get("goal_id")?,
        user_id: row.get("user_id")?,
        completed_at: parse_timestamp(&row.get::<_, String>("completed_at")?)?,
        created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
    })
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/questlog/questlog.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()
            .map_err(|e| DatabaseError::OpenFailed {
                path: "~/.config/questlog".into(),
                source: rusqlite::Error::InvalidPath(e.to_string().into()),
            })?
            .join("questlog.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (tests and throwaway runs).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, DatabaseError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    // === Users ===

    /// Create a user with fresh gamification state (level 1, zero XP).
    pub fn create_user(&self, name: &str, email: &str) -> Result<User, DatabaseError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            level: 1,
            experience: 0,
            total_experience: 0,
            experience_to_next_level: 100,
            current_streak: 0,
            longest_streak: 0,
            last_interaction_date: None,
            created_at: now,
            updated_at: now,
        };
        self.conn.execute(
            "INSERT INTO users (id, name, email, level, experience, total_experience,
                                experience_to_next_level, current_streak, longest_streak,
                                last_interaction_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, ?10, ?11)",
            params![
                user.id,
                user.name,
                user.email,
                user.level,
                user.experience,
                user.total_experience,
                user.experience_to_next_level,
                user.current_streak,
                user.longest_streak,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;
        Ok(user)
    }

    pub fn find_user(&self, user_id: &str) -> Result<Option<User>, DatabaseError> {
        let user = self
            .conn
            .query_row("SELECT * FROM users WHERE id = ?1", params![user_id], map_user)
            .optional()?;
        Ok(user)
    }

    /// Persist a gamification update. XP fields are always written; streak
    /// fields only when the update carries them.
    pub fn update_gamification(
        &self,
        user_id: &str,
        update: &GamificationUpdate,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        match (update.current_streak, update.longest_streak, update.last_interaction_date) {
            (Some(current), Some(longest), Some(last)) => {
                self.conn.execute(
                    "UPDATE users
                     SET experience = ?1, total_experience = ?2, level = ?3,
                         experience_to_next_level = ?4, current_streak = ?5,
                         longest_streak = ?6, last_interaction_date = ?7, updated_at = ?8
                     WHERE id = ?9",
                    params![
                        update.experience,
                        update.total_experience,
                        update.level,
                        update.experience_to_next_level,
                        current,
                        longest,
                        last.to_rfc3339(),
                        now,
                        user_id,
                    ],
                )?;
            }
            _ => {
                self.conn.execute(
                    "UPDATE users
                     SET experience = ?1, total_experience = ?2, level = ?3,
                         experience_to_next_level = ?4, updated_at = ?5
                     WHERE id = ?6",
                    params![
                        update.experience,
                        update.total_experience,
                        update.level,
                        update.experience_to_next_level,
                        now,
                        user_id,
                    ],
                )?;
            }
        }
        Ok(())
    }

    pub fn count_users(&self) -> Result<u64, DatabaseError> {
        let count =
            self.conn
                .query_row("SELECT COUNT(*) FROM users", [], |row| row.get::<_, u64>(0))?;
        Ok(count)
    }

    /// Top-N ranking for a category. Ties resolve by completed goals.
    pub fn ranking(
        &self,
        category: RankCategory,
        limit: u32,
    ) -> Result<Vec<RankedUser>, DatabaseError> {
        let sql = format!(
            "SELECT u.id, u.name, u.level, u.experience, u.current_streak,
                    (SELECT COUNT(*) FROM goal_completions c WHERE c.user_id = u.id)
                        AS completed_goals,
                    RANK() OVER (ORDER BY {},
                        (SELECT COUNT(*) FROM goal_completions c2 WHERE c2.user_id = u.id) DESC)
                        AS position
             FROM users u
             ORDER BY position
             LIMIT ?1",
            category.order_clause()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], map_ranked_user)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Ranking row for a single user, regardless of their position.
    pub fn user_rank(
        &self,
        user_id: &str,
        category: RankCategory,
    ) -> Result<Option<RankedUser>, DatabaseError> {
        let sql = format!(
            "WITH ranked AS (
                SELECT u.id, u.name, u.level, u.experience, u.current_streak,
                       (SELECT COUNT(*) FROM goal_completions c WHERE c.user_id = u.id)
                           AS completed_goals,
                       RANK() OVER (ORDER BY {},
                           (SELECT COUNT(*) FROM goal_completions c2 WHERE c2.user_id = u.id) DESC)
                           AS position
                FROM users u
             )
             SELECT * FROM ranked WHERE id = ?1",
            category.order_clause()
        );
        let row = self
            .conn
            .query_row(&sql, params![user_id], map_ranked_user)
            .optional()?;
        Ok(row)
    }

    /// Users whose last interaction falls in `[start, end)` and whose
    /// streak is still alive. These lose the streak after one more idle day.
    pub fn users_with_streak_at_risk(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<User>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM users
             WHERE last_interaction_date >= ?1 AND last_interaction_date < ?2
               AND current_streak > 0",
        )?;
        let rows = stmt.query_map(params![start.to_rfc3339(), end.to_rfc3339()], map_user)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // === Goals ===

    pub fn create_goal(
        &self,
        user_id: &str,
        title: &str,
        desired_weekly_frequency: u8,
        xp_reward: u32,
        now: DateTime<Utc>,
    ) -> Result<Goal, DatabaseError> {
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            desired_weekly_frequency,
            xp_reward,
            created_at: now,
            updated_at: now,
        };
        self.conn.execute(
            "INSERT INTO goals (id, user_id, title, desired_weekly_frequency, xp_reward,
                                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                goal.id,
                goal.user_id,
                goal.title,
                goal.desired_weekly_frequency,
                goal.xp_reward,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;
        Ok(goal)
    }

    /// Find a goal scoped to its owner. A goal owned by someone else is
    /// indistinguishable from a missing one.
    pub fn find_goal(&self, goal_id: &str, user_id: &str) -> Result<Option<Goal>, DatabaseError> {
        let goal = self
            .conn
            .query_row(
                "SELECT * FROM goals WHERE id = ?1 AND user_id = ?2",
                params![goal_id, user_id],
                map_goal,
            )
            .optional()?;
        Ok(goal)
    }

    pub fn update_goal(&self, goal: &Goal) -> Result<(), DatabaseError> {
        self.conn.execute(
            "UPDATE goals
             SET title = ?1, desired_weekly_frequency = ?2, xp_reward = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                goal.title,
                goal.desired_weekly_frequency,
                goal.xp_reward,
                goal.updated_at.to_rfc3339(),
                goal.id,
            ],
        )?;
        Ok(())
    }

    pub fn delete_goal(&self, goal_id: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM goals WHERE id = ?1", params![goal_id])?;
        Ok(())
    }

    /// All goals for a user with their completion count since `week_start`.
    pub fn list_goals_with_week_counts(
        &self,
        user_id: &str,
        week_start: DateTime<Utc>,
    ) -> Result<Vec<GoalProgress>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT g.*,
                    (SELECT COUNT(*) FROM goal_completions c
                     WHERE c.goal_id = g.id AND c.completed_at >= ?2) AS week_count
             FROM goals g
             WHERE g.user_id = ?1
             ORDER BY g.created_at",
        )?;
        let rows = stmt.query_map(params![user_id, week_start.to_rfc3339()], |row| {
            Ok(GoalProgress {
                goal: map_goal(row)?,
                completions_this_week: row.get("week_count")?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // === Completions ===

    /// Insert a completion for the given local calendar day.
    ///
    /// Fails with [`DatabaseError::Duplicate`] if the day is already
    /// completed for this goal, which closes the concurrent double-submit
    /// race.
    pub fn create_completion(
        &self,
        goal_id: &str,
        user_id: &str,
        completed_at: DateTime<Utc>,
        completed_day: NaiveDate,
    ) -> Result<GoalCompletion, DatabaseError> {
        let completion = GoalCompletion {
            id: Uuid::new_v4().to_string(),
            goal_id: goal_id.to_string(),
            user_id: user_id.to_string(),
            completed_at,
            created_at: completed_at,
        };
        self.conn.execute(
            "INSERT INTO goal_completions (id, goal_id, user_id, completed_at, completed_day,
                                           created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                completion.id,
                completion.goal_id,
                completion.user_id,
                completed_at.to_rfc3339(),
                completed_day.to_string(),
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(completion)
    }

    pub fn delete_completion(&self, completion_id: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "DELETE FROM goal_completions WHERE id = ?1",
            params![completion_id],
        )?;
        Ok(())
    }

    /// The completion recorded for `day`, if any.
    pub fn find_completion_on_day(
        &self,
        goal_id: &str,
        user_id: &str,
        day: NaiveDate,
    ) -> Result<Option<GoalCompletion>, DatabaseError> {
        let completion = self
            .conn
            .query_row(
                "SELECT * FROM goal_completions
                 WHERE goal_id = ?1 AND user_id = ?2 AND completed_day = ?3",
                params![goal_id, user_id, day.to_string()],
                map_completion,
            )
            .optional()?;
        Ok(completion)
    }

    pub fn count_week_completions(
        &self,
        goal_id: &str,
        user_id: &str,
        week_start: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM goal_completions
             WHERE goal_id = ?1 AND user_id = ?2 AND completed_at >= ?3",
            params![goal_id, user_id, week_start.to_rfc3339()],
            |row| row.get::<_, u64>(0),
        )?;
        Ok(count)
    }

    pub fn completions_for_goal(
        &self,
        goal_id: &str,
        user_id: &str,
    ) -> Result<Vec<GoalCompletion>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM goal_completions
             WHERE goal_id = ?1 AND user_id = ?2
             ORDER BY completed_at",
        )?;
        let rows = stmt.query_map(params![goal_id, user_id], map_completion)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Delete every completion of a goal, returning how many were removed.
    pub fn delete_completions_for_goal(&self, goal_id: &str) -> Result<u64, DatabaseError> {
        let deleted = self.conn.execute(
            "DELETE FROM goal_completions WHERE goal_id = ?1",
            params![goal_id],
        )?;
        Ok(deleted as u64)
    }

    /// Lifetime completion count across all of a user's goals.
    pub fn count_completions_by_user(&self, user_id: &str) -> Result<u64, DatabaseError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM goal_completions WHERE user_id = ?1",
            params![user_id],
            |row| row.get::<_, u64>(0),
        )?;
        Ok(count)
    }

    /// `(completed_at, xp_reward)` pairs for progress reporting, oldest
    /// first. The reward comes from the owning goal's current record.
    pub fn completions_with_xp(
        &self,
        user_id: &str,
    ) -> Result<Vec<(DateTime<Utc>, u32)>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT c.completed_at, g.xp_reward
             FROM goal_completions c
             JOIN goals g ON g.id = c.goal_id
             WHERE c.user_id = ?1
             ORDER BY c.completed_at",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            let at = parse_timestamp(&row.get::<_, String>(0)?)?;
            Ok((at, row.get::<_, u32>(1)?))
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Destructive weekly prune: drop completions older than `cutoff`.
    pub fn prune_completions_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DatabaseError> {
        let deleted = self.conn.execute(
            "DELETE FROM goal_completions WHERE completed_at < ?1",
            params![cutoff.to_rfc3339()],
        )?;
        Ok(deleted as u64)
    }

    // === Achievements ===

    /// Record an unlock. Idempotent: re-unlocking an existing pair is a
    /// no-op rather than an error.
    pub fn unlock_achievement(
        &self,
        user_id: &str,
        achievement_id: &str,
        unlocked_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO user_achievements (id, user_id, achievement_id, unlocked_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                Uuid::new_v4().to_string(),
                user_id,
                achievement_id,
                unlocked_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn find_unlocked(&self, user_id: &str) -> Result<Vec<UnlockedAchievement>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT achievement_id, unlocked_at FROM user_achievements
             WHERE user_id = ?1
             ORDER BY unlocked_at",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(UnlockedAchievement {
                achievement_id: row.get(0)?,
                unlocked_at: parse_timestamp(&row.get::<_, String>(1)?)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn map_ranked_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<RankedUser> {
    Ok(RankedUser {
        id: row.get("id")?,
        name: row.get("name")?,
        level: row.get("level")?,
        experience: row.get("experience")?,
        current_streak: row.get("current_streak")?,
        completed_goals: row.get("completed_goals")?,
        position: row.get("position")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_memory().unwrap()
    }

    #[test]
    fn test_create_and_find_user() {
        let db = db();
        let user = db.create_user("Ada", "ada@example.com").unwrap();
        let found = db.find_user(&user.id).unwrap().unwrap();
        assert_eq!(found.level, 1);
        assert_eq!(found.experience_to_next_level, 100);
        assert!(found.last_interaction_date.is_none());
    }

    #[test]
    fn test_duplicate_email_is_typed() {
        let db = db();
        db.create_user("Ada", "ada@example.com").unwrap();
        let second = db.create_user("Ada Again", "ada@example.com");
        assert!(matches!(second, Err(DatabaseError::Duplicate(_))));
    }

    #[test]
    fn test_find_goal_is_owner_scoped() {
        let db = db();
        let owner = db.create_user("Ada", "ada@example.com").unwrap();
        let other = db.create_user("Bob", "bob@example.com").unwrap();
        let goal = db
            .create_goal(&owner.id, "Read", 3, 20, Utc::now())
            .unwrap();
        assert!(db.find_goal(&goal.id, &owner.id).unwrap().is_some());
        assert!(db.find_goal(&goal.id, &other.id).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_completion_day_is_typed() {
        let db = db();
        let user = db.create_user("Ada", "ada@example.com").unwrap();
        let goal = db.create_goal(&user.id, "Read", 3, 20, Utc::now()).unwrap();
        let now = Utc::now();
        let day = now.date_naive();
        db.create_completion(&goal.id, &user.id, now, day).unwrap();
        let second = db.create_completion(&goal.id, &user.id, now, day);
        assert!(matches!(second, Err(DatabaseError::Duplicate(_))));
    }

    #[test]
    fn test_week_count_excludes_older_completions() {
        let db = db();
        let user = db.create_user("Ada", "ada@example.com").unwrap();
        let goal = db.create_goal(&user.id, "Read", 3, 20, Utc::now()).unwrap();
        let week_start: DateTime<Utc> = "2024-06-09T00:00:00Z".parse().unwrap();
        let in_week: DateTime<Utc> = "2024-06-10T12:00:00Z".parse().unwrap();
        let before: DateTime<Utc> = "2024-06-08T12:00:00Z".parse().unwrap();
        db.create_completion(&goal.id, &user.id, in_week, in_week.date_naive())
            .unwrap();
        db.create_completion(&goal.id, &user.id, before, before.date_naive())
            .unwrap();
        assert_eq!(
            db.count_week_completions(&goal.id, &user.id, week_start).unwrap(),
            1
        );
        assert_eq!(db.count_completions_by_user(&user.id).unwrap(), 2);
    }

    #[test]
    fn test_deleting_goal_cascades_completions() {
        let db = db();
        let user = db.create_user("Ada", "ada@example.com").unwrap();
        let goal = db.create_goal(&user.id, "Read", 3, 20, Utc::now()).unwrap();
        let now = Utc::now();
        db.create_completion(&goal.id, &user.id, now, now.date_naive())
            .unwrap();
        db.delete_goal(&goal.id).unwrap();
        assert_eq!(db.count_completions_by_user(&user.id).unwrap(), 0);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let db = db();
        let user = db.create_user("Ada", "ada@example.com").unwrap();
        let now = Utc::now();
        db.unlock_achievement(&user.id, "goals_bronze", now).unwrap();
        db.unlock_achievement(&user.id, "goals_bronze", now).unwrap();
        assert_eq!(db.find_unlocked(&user.id).unwrap().len(), 1);
    }

    #[test]
    fn test_ranking_orders_by_category() {
        let db = db();
        let a = db.create_user("Ada", "ada@example.com").unwrap();
        let b = db.create_user("Bob", "bob@example.com").unwrap();
        db.update_gamification(
            &a.id,
            &GamificationUpdate {
                experience: 50,
                total_experience: 50,
                level: 1,
                experience_to_next_level: 100,
                current_streak: Some(2),
                longest_streak: Some(2),
                last_interaction_date: Some(Utc::now()),
            },
        )
        .unwrap();
        db.update_gamification(
            &b.id,
            &GamificationUpdate {
                experience: 10,
                total_experience: 310,
                level: 3,
                experience_to_next_level: 519,
                current_streak: Some(9),
                longest_streak: Some(9),
                last_interaction_date: Some(Utc::now()),
            },
        )
        .unwrap();

        let by_xp = db.ranking(RankCategory::Xp, 10).unwrap();
        assert_eq!(by_xp[0].id, a.id);
        let by_level = db.ranking(RankCategory::Level, 10).unwrap();
        assert_eq!(by_level[0].id, b.id);

        let rank = db.user_rank(&a.id, RankCategory::Level).unwrap().unwrap();
        assert_eq!(rank.position, 2);
    }

    #[test]
    fn test_file_backed_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questlog.db");
        let user_id = {
            let db = Database::open_at(&path).unwrap();
            db.create_user("Ada", "ada@example.com").unwrap().id
        };
        let db = Database::open_at(&path).unwrap();
        assert!(db.find_user(&user_id).unwrap().is_some());
    }

    #[test]
    fn test_prune_completions_before_cutoff() {
        let db = db();
        let user = db.create_user("Ada", "ada@example.com").unwrap();
        let goal = db.create_goal(&user.id, "Read", 3, 20, Utc::now()).unwrap();
        let old: DateTime<Utc> = "2024-06-01T12:00:00Z".parse().unwrap();
        let recent: DateTime<Utc> = "2024-06-10T12:00:00Z".parse().unwrap();
        db.create_completion(&goal.id, &user.id, old, old.date_naive())
            .unwrap();
        db.create_completion(&goal.id, &user.id, recent, recent.date_naive())
            .unwrap();

        let cutoff: DateTime<Utc> = "2024-06-09T00:00:00Z".parse().unwrap();
        assert_eq!(db.prune_completions_before(cutoff).unwrap(), 1);
        assert_eq!(db.count_completions_by_user(&user.id).unwrap(), 1);
    }
}
