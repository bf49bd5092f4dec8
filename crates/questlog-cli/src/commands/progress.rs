//! Progress report commands for CLI.

use clap::Subcommand;
use questlog_core::{Config, Database, MemoryCache, Period, ProfileService};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Show a user's progress report
    Show {
        /// User ID
        user_id: String,
        /// Reporting period: 7d, 30d, 90d, or all
        #[arg(long, default_value = "30d")]
        period: String,
    },
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let cache = MemoryCache::new();
    let service = ProfileService::new(&db, &cache, config.timezone());

    match action {
        ProgressAction::Show { user_id, period } => {
            let period: Period = period.parse()?;
            let report = service.progress(&user_id, period)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
