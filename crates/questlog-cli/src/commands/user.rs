//! User management commands for CLI.

use clap::Subcommand;
use questlog_core::storage::RankCategory;
use questlog_core::{Config, Database, MemoryCache, ProfileService};

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a new user
    Create {
        /// Display name
        name: String,
        /// Email address
        email: String,
    },
    /// Show a user's profile
    Profile {
        /// User ID
        id: String,
    },
    /// Show the ranking with the user's own position
    Ranking {
        /// User ID
        id: String,
        /// Ranking category: xp, level, or streak
        #[arg(long, default_value = "xp")]
        category: String,
    },
}

pub fn run(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let cache = MemoryCache::new();

    match action {
        UserAction::Create { name, email } => {
            let user = db.create_user(&name, &email)?;
            println!("User created: {}", user.id);
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UserAction::Profile { id } => {
            let service = ProfileService::new(&db, &cache, config.timezone());
            let profile = service.profile(&id)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        UserAction::Ranking { id, category } => {
            let category: RankCategory = category.parse()?;
            let service = ProfileService::new(&db, &cache, config.timezone());
            let ranking = service.ranking(&id, category, config.ranking_limit)?;
            println!("{}", serde_json::to_string_pretty(&ranking)?);
        }
    }
    Ok(())
}
