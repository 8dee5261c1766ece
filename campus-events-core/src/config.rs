//! Global campus-events configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CampusError, CampusResult};

static DEFAULT_DATA_PATH: &str = "~/.campus-events";
static DEFAULT_LOG_LEVEL: &str = "warn";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn is_default_data_path(p: &PathBuf) -> bool {
    *p == default_data_path()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn is_default_log_level(level: &String) -> bool {
    level == DEFAULT_LOG_LEVEL
}

/// Configuration at ~/.config/campus-events/config.toml
///
/// Any field can be overridden with a `CAMPUS_EVENTS_<FIELD>` environment
/// variable, e.g. `CAMPUS_EVENTS_DATA_DIR=/tmp/events`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CampusConfig {
    /// Directory holding the persisted users, session and events
    #[serde(default = "default_data_path", skip_serializing_if = "is_default_data_path")]
    pub data_dir: PathBuf,

    /// Fallback log filter when RUST_LOG is not set
    #[serde(default = "default_log_level", skip_serializing_if = "is_default_log_level")]
    pub log_level: String,
}

impl Default for CampusConfig {
    fn default() -> Self {
        CampusConfig {
            data_dir: default_data_path(),
            log_level: default_log_level(),
        }
    }
}

impl CampusConfig {
    pub fn config_path() -> CampusResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CampusError::Config("Could not determine config directory".into()))?
            .join("campus-events");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config from its default location, creating a commented
    /// default file on first run.
    pub fn load() -> CampusResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load the config from `path` (missing file is fine) plus environment overrides.
    pub fn load_from(path: &Path) -> CampusResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CAMPUS_EVENTS"))
            .build()
            .map_err(|e| CampusError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CampusError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn save(&self) -> CampusResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> CampusResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CampusError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CampusError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CampusResult<()> {
        let contents = format!(
            "\
# campus-events configuration

# Where users, the current session and events are stored:
# data_dir = \"{}\"

# Log level used when RUST_LOG is not set:
# log_level = \"{}\"
",
            DEFAULT_DATA_PATH, DEFAULT_LOG_LEVEL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CampusError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CampusError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
