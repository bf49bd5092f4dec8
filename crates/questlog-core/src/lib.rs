//! # Questlog Core Library
//!
//! Core business logic for Questlog, a goal-tracking backend with habit
//! gamification: users create weekly goals, complete them day by day, and
//! accrue experience, levels, streaks, and achievements.
//!
//! ## Architecture
//!
//! - **Gamification engines**: pure XP/level arithmetic and streak
//!   continuity, deterministic functions of their inputs
//! - **Achievements**: a static rule catalog matched against user stats
//! - **Goal orchestrator**: the completion toggle transaction composing
//!   the engines with storage and cache invalidation
//! - **Storage**: SQLite-backed repository with versioned migrations and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`GoalService`]: goal mutations and the completion toggle
//! - [`ProfileService`]: cached reads (profile, ranking, progress)
//! - [`Database`]: persistent state
//! - [`Config`]: timezone anchor and application settings

pub mod achievements;
pub mod cache;
pub mod calendar;
pub mod error;
pub mod gamification;
pub mod goal;
pub mod maintenance;
pub mod profile;
pub mod stats;
pub mod storage;
pub mod user;

pub use cache::{CacheSink, MemoryCache, NoopCache};
pub use error::{CoreError, DatabaseError, Result};
pub use goal::{CompletionOutcome, DeleteGoalOutcome, Goal, GoalService};
pub use profile::{ProfileService, RankingResult, UserProfile};
pub use stats::{Period, ProgressReport};
pub use storage::{Config, Database, RankCategory};
pub use user::User;
