//! Goal management commands for CLI.

use clap::Subcommand;
use questlog_core::goal::{GoalPatch, NewGoal};
use questlog_core::{Config, Database, GoalService, MemoryCache};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a new goal
    Create {
        /// User ID
        user_id: String,
        /// Goal title
        title: String,
        /// Desired completions per week (1-7)
        #[arg(long, default_value = "1")]
        frequency: u8,
    },
    /// List goals with this week's progress
    List {
        /// User ID
        user_id: String,
    },
    /// Update a goal
    Update {
        /// Goal ID
        id: String,
        /// User ID
        user_id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New desired completions per week (1-7)
        #[arg(long)]
        frequency: Option<u8>,
    },
    /// Delete a goal, reversing this week's XP
    Delete {
        /// Goal ID
        id: String,
        /// User ID
        user_id: String,
    },
    /// Toggle a goal's completion for today
    Complete {
        /// Goal ID
        id: String,
        /// User ID
        user_id: String,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let cache = MemoryCache::new();
    let service = GoalService::new(&db, &cache, config.timezone());

    match action {
        GoalAction::Create {
            user_id,
            title,
            frequency,
        } => {
            let goal = service.create_goal(
                &user_id,
                &NewGoal {
                    title,
                    desired_weekly_frequency: frequency,
                },
            )?;
            println!("Goal created: {}", goal.id);
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        GoalAction::List { user_id } => {
            let goals = service.list_goals(&user_id)?;
            println!("{}", serde_json::to_string_pretty(&goals)?);
        }
        GoalAction::Update {
            id,
            user_id,
            title,
            frequency,
        } => {
            let goal = service.update_goal(
                &id,
                &user_id,
                &GoalPatch {
                    title,
                    desired_weekly_frequency: frequency,
                },
            )?;
            println!("Goal updated:");
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        GoalAction::Delete { id, user_id } => {
            let outcome = service.delete_goal(&id, &user_id)?;
            println!("Goal deleted: {id}");
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        GoalAction::Complete { id, user_id } => {
            let outcome = service.complete_goal(&id, &user_id)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}
