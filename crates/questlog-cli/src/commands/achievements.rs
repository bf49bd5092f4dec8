//! Achievement commands for CLI.

use clap::Subcommand;
use questlog_core::achievements::CATALOG;
use questlog_core::{Config, Database, MemoryCache, ProfileService};

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// Print the full achievement catalog
    Catalog,
    /// List the catalog with a user's unlock status
    List {
        /// User ID
        user_id: String,
    },
}

pub fn run(action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AchievementsAction::Catalog => {
            println!("{}", serde_json::to_string_pretty(CATALOG)?);
        }
        AchievementsAction::List { user_id } => {
            let db = Database::open()?;
            let config = Config::load()?;
            let cache = MemoryCache::new();
            let service = ProfileService::new(&db, &cache, config.timezone());
            let statuses = service.achievements(&user_id)?;
            println!("{}", serde_json::to_string_pretty(&statuses)?);
        }
    }
    Ok(())
}
