//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix; `WORK_TRACKER_DB_PATH` sets `db_path`.
pub const ENV_PREFIX: &str = "WORK_TRACKER_";

/// Configuration errors, raised before the database is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config source could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    /// No source provided a database path and no default applies.
    #[error("no database path configured. Set WORK_TRACKER_DB_PATH or db_path in config.toml")]
    MissingDatabasePath,
}

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &self.db_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: dirs_data_path().map(|p| p.join("work_tracker.db")),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        // Environment variables (WORK_TRACKER_*) override the files
        Self::file_figment(config_path)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Defaults merged with the config files, without the environment.
    fn file_figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// The resolved database path.
    pub fn database_path(&self) -> Result<&Path, ConfigError> {
        self.db_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingDatabasePath)
    }
}

/// Returns the platform-specific config directory for the tracker.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("work-tracker"))
}

/// Returns the platform-specific data directory for the tracker.
///
/// On Linux: `~/.local/share/work-tracker`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("work-tracker"))
}
