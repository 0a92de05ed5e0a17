//! Strongly typed configuration sections

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete Tresso configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TressoConfig {
    pub database: DatabaseConfig,
    pub log: LogConfig,
    pub user: UserConfig,
    pub ordering: OrderingConfig,
}

/// Where boards are persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tresso.db"),
        }
    }
}

/// Logging verbosity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// An `EnvFilter` directive, e.g. "info" or "tresso_sync=debug,info"
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// The already-authenticated user the CLI acts as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub id: i64,
    /// Name recorded in the activity log; defaults to "user:<id>"
    pub actor: Option<String>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self { id: 1, actor: None }
    }
}

impl UserConfig {
    /// Actor string for activity attribution
    pub fn actor_name(&self) -> String {
        self.actor
            .clone()
            .unwrap_or_else(|| format!("user:{}", self.id))
    }
}

/// Fractional ordering maintenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Renumber crowded sibling lists after a full fetch
    pub compact_on_fetch: bool,
    /// Smallest gap between neighbouring orders before a list counts as crowded
    pub min_gap: f64,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            compact_on_fetch: false,
            min_gap: 1e-9,
        }
    }
}

impl TressoConfig {
    /// Reject values that parse but cannot work
    pub fn validate(&self) -> ConfigResult<()> {
        if self.user.id <= 0 {
            return Err(ConfigError::invalid_value(
                "user.id",
                "must be a positive integer",
            ));
        }
        if !self.ordering.min_gap.is_finite() || self.ordering.min_gap <= 0.0 {
            return Err(ConfigError::invalid_value(
                "ordering.min_gap",
                "must be a positive finite number",
            ));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value("database.path", "must not be empty"));
        }
        Ok(())
    }
}
