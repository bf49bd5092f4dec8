//! Maintenance job commands for CLI.
//!
//! These are the same jobs a deployment would run from its scheduler,
//! exposed for manual runs and debugging.

use chrono::Utc;
use clap::Subcommand;
use questlog_core::maintenance::{reset_weekly_completions, streaks_at_risk};
use questlog_core::{Config, Database};

#[derive(Subcommand)]
pub enum MaintenanceAction {
    /// Delete completions from before the current week
    ResetWeek,
    /// List users one idle day away from losing their streak
    StreakRisk,
}

pub fn run(action: MaintenanceAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let tz = config.timezone();

    match action {
        MaintenanceAction::ResetWeek => {
            let summary = reset_weekly_completions(&db, Utc::now(), &tz)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        MaintenanceAction::StreakRisk => {
            let at_risk = streaks_at_risk(&db, Utc::now(), &tz)?;
            println!("{}", serde_json::to_string_pretty(&at_risk)?);
        }
    }
    Ok(())
}
