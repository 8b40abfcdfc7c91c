//! Configuration loading.
//!
//! Settings come from a TOML file or from the environment (with `.env`
//! support). Every key is optional and falls back to the defaults below.

use crate::locations::DEFAULT_DATA_DIR;
use crate::logging::{self, LogLevel, Source};
use crate::potential::GRID_POINTS;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "PLOT_DATA_DIR";
pub const ENV_GRID_POINTS: &str = "PLOT_GRID_POINTS";
pub const ENV_LOG_LEVEL: &str = "PLOT_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "PLOT_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Directory holding the `<location>.gz` logs.
    pub data_dir: PathBuf,
    /// Samples per axis for the potential surface.
    pub grid_points: usize,
    /// One of `debug`, `info`, `warn`, `error`.
    pub log_level: String,
    /// Append log lines to this file as well as the console.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            grid_points: GRID_POINTS,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was read and parsed
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| rejected(format!("Failed to read config file: {}", e)))?;

        let config = Self::parse(&content)?;
        logging::debug(
            Source::Config,
            None,
            &format!("Loaded configuration from {}", config_path.display()),
        );
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(content).map_err(|e| rejected(format!("Failed to parse config file: {}", e)))?;
        config.validate().map_err(rejected)?;
        Ok(config)
    }

    /// Build configuration from `PLOT_*` environment variables, reading a
    /// `.env` file first if one exists.
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as `from_env`, with variable lookup supplied by the caller.
    pub fn from_vars<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(points) = lookup(ENV_GRID_POINTS) {
            config.grid_points = points
                .trim()
                .parse()
                .map_err(|e| rejected(format!("Invalid {} '{}': {}", ENV_GRID_POINTS, points, e)))?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(file) = lookup(ENV_LOG_FILE) {
            config.log_file = Some(file);
        }

        config.validate().map_err(rejected)?;
        Ok(config)
    }

    /// The configured log level, parsed.
    pub fn log_level(&self) -> Result<LogLevel, String> {
        self.log_level.parse()
    }

    fn validate(&self) -> Result<(), String> {
        if self.grid_points == 0 {
            return Err("grid-points must be at least 1".to_string());
        }
        self.log_level()?;
        Ok(())
    }
}

/// Logs a configuration failure and hands the message back to the caller.
fn rejected(message: String) -> String {
    logging::error(Source::Config, None, &message);
    message
}
