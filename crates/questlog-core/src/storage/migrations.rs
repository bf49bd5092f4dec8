//! Database schema migrations for questlog.
//!
//! Migrations are versioned and applied automatically when opening the
//! database. The `schema_version` table tracks the current version.

use rusqlite::{Connection, Result as SqliteResult};

/// Apply all pending migrations.
///
/// # Errors
/// Returns an error if a migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version, 0 for a fresh database.
fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or(0)
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// v1: base tables for users, goals, completions, and unlock records.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id                       TEXT PRIMARY KEY,
            name                     TEXT NOT NULL,
            email                    TEXT NOT NULL UNIQUE,
            level                    INTEGER NOT NULL DEFAULT 1,
            experience               INTEGER NOT NULL DEFAULT 0,
            total_experience         INTEGER NOT NULL DEFAULT 0,
            experience_to_next_level INTEGER NOT NULL DEFAULT 100,
            current_streak           INTEGER NOT NULL DEFAULT 0,
            longest_streak           INTEGER NOT NULL DEFAULT 0,
            last_interaction_date    TEXT,
            created_at               TEXT NOT NULL,
            updated_at               TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS goals (
            id                       TEXT PRIMARY KEY,
            user_id                  TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title                    TEXT NOT NULL,
            desired_weekly_frequency INTEGER NOT NULL,
            xp_reward                INTEGER NOT NULL DEFAULT 10,
            created_at               TEXT NOT NULL,
            updated_at               TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS goal_completions (
            id           TEXT PRIMARY KEY,
            goal_id      TEXT NOT NULL REFERENCES goals(id) ON DELETE CASCADE,
            user_id      TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            completed_at TEXT NOT NULL,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS user_achievements (
            id             TEXT PRIMARY KEY,
            user_id        TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            achievement_id TEXT NOT NULL,
            unlocked_at    TEXT NOT NULL,
            UNIQUE (user_id, achievement_id)
        );

        CREATE INDEX IF NOT EXISTS goals_user_id_idx ON goals(user_id);
        CREATE INDEX IF NOT EXISTS goal_completions_goal_user_idx
            ON goal_completions(goal_id, user_id);
        CREATE INDEX IF NOT EXISTS goal_completions_user_idx
            ON goal_completions(user_id);
        CREATE INDEX IF NOT EXISTS goal_completions_completed_at_idx
            ON goal_completions(completed_at);",
    )?;
    set_schema_version(conn, 1)
}

/// v2: per-day completion key.
///
/// Two concurrent toggle-on requests could both observe "not completed
/// today" and insert twice; the unique index closes that race at the
/// storage level. `completed_day` is the calendar day in the configured
/// anchor timezone, written at insert time; existing rows backfill from
/// the UTC date prefix of `completed_at`.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "ALTER TABLE goal_completions ADD COLUMN completed_day TEXT NOT NULL DEFAULT '';

        UPDATE goal_completions
            SET completed_day = substr(completed_at, 1, 10)
            WHERE completed_day = '';

        CREATE UNIQUE INDEX IF NOT EXISTS goal_completions_day_unique
            ON goal_completions(goal_id, user_id, completed_day);",
    )?;
    set_schema_version(conn, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), 2);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), 2);
    }

    #[test]
    fn test_duplicate_day_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        conn.execute(
            "INSERT INTO users (id, name, email, created_at, updated_at)
             VALUES ('u1', 'User', 'u1@example.com', '2024-06-12T10:00:00+00:00', '2024-06-12T10:00:00+00:00')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO goals (id, user_id, title, desired_weekly_frequency, created_at, updated_at)
             VALUES ('g1', 'u1', 'Goal', 3, '2024-06-12T10:00:00+00:00', '2024-06-12T10:00:00+00:00')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO goal_completions (id, goal_id, user_id, completed_at, completed_day, created_at)
             VALUES ('c1', 'g1', 'u1', '2024-06-12T10:00:00+00:00', '2024-06-12', '2024-06-12T10:00:00+00:00')",
            [],
        )
        .unwrap();
        let second = conn.execute(
            "INSERT INTO goal_completions (id, goal_id, user_id, completed_at, completed_day, created_at)
             VALUES ('c2', 'g1', 'u1', '2024-06-12T18:00:00+00:00', '2024-06-12', '2024-06-12T18:00:00+00:00')",
            [],
        );
        assert!(second.is_err());
    }
}
