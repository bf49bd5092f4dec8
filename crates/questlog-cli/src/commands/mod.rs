//! CLI command implementations.

pub mod achievements;
pub mod config;
pub mod goal;
pub mod maintenance;
pub mod progress;
pub mod user;
