//! CLI configuration management.
//!
//! Handles loading of `findata.toml` with environment variable override
//! support. Every field has a default, so a missing file is not an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "findata.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,

    /// Directory that relative output file names are resolved against
    pub output_dir: PathBuf,

    /// File name of the factor CSV
    pub factor_output: String,

    /// File name of the Heston CSV
    pub heston_output: String,

    /// File name of the correlated-factor CSV
    pub correlated_output: String,

    /// File name of the Heston panel CSV
    pub panel_output: String,

    /// Fixed decimal places for CSV values; shortest round-trip form when unset
    pub float_precision: Option<usize>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            output_dir: PathBuf::from("."),
            factor_output: "factor_output.csv".to_string(),
            heston_output: "heston_output.csv".to_string(),
            correlated_output: "correlated_output.csv".to_string(),
            panel_output: "panel_output.csv".to_string(),
            float_precision: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(log_level) = std::env::var("FINDATA_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(output_dir) = std::env::var("FINDATA_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        for (name, value) in [
            ("factor_output", &self.factor_output),
            ("heston_output", &self.heston_output),
            ("correlated_output", &self.correlated_output),
            ("panel_output", &self.panel_output),
        ] {
            if value.is_empty() {
                errors.push(format!("{} cannot be empty", name));
            }
        }

        if let Some(precision) = self.float_precision {
            if precision > 17 {
                errors.push(format!(
                    "float_precision {} exceeds maximum meaningful precision (17)",
                    precision
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults), apply environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Explicit path if given, else `file_name` under `output_dir`
    pub fn resolve_output(&self, explicit: Option<&Path>, file_name: &str) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.output_dir.join(file_name),
        }
    }

    /// Default path of the factor CSV
    pub fn factor_path(&self) -> PathBuf {
        self.output_dir.join(&self.factor_output)
    }

    /// Default path of the Heston CSV
    pub fn heston_path(&self) -> PathBuf {
        self.output_dir.join(&self.heston_output)
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {}: {message}", .path.display())]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
