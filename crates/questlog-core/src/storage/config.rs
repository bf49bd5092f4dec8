//! TOML-based application configuration.
//!
//! Stored at `~/.config/questlog/config.toml`. The timezone offset anchors
//! "today" for completion-day comparisons; day arithmetic itself is
//! timezone-parametric (see [`crate::calendar`]).

use chrono::{FixedOffset, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minutes east of UTC used as the day-boundary anchor. The reference
    /// deployment runs at -180 (UTC-3).
    #[serde(default)]
    pub timezone_offset_minutes: i32,
    /// Number of rows returned by ranking queries.
    #[serde(default = "default_ranking_limit")]
    pub ranking_limit: u32,
}

fn default_ranking_limit() -> u32 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone_offset_minutes: 0,
            ranking_limit: default_ranking_limit(),
        }
    }
}

impl Config {
    /// Load the configuration, creating a default file if none exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist the configuration.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The configured anchor timezone. Offsets outside the valid range
    /// fall back to UTC.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/questlog"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }
}
