//! Environment configuration (`soform.toml`) parsing and validation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{0}': {1}")]
    InvalidValue(&'static str, String),
}

/// Settings shared by every form and grid created in one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Number of layout columns used by new forms.
    pub form_columns: usize,

    /// Message shown when a required field is left empty.
    pub required_message: String,

    /// Message shown when a validator rejects a value without its own message.
    pub invalid_message: String,

    /// Message shown when a setter fails without being handled.
    pub set_error_message: String,

    /// `chrono` format used to display dates.
    pub date_format: String,

    /// Separator placed between slots in the default multi-value column template.
    pub template_separator: String,

    /// Text shown for `true` in grid cells.
    pub true_text: String,

    /// Text shown for `false` in grid cells.
    pub false_text: String,

    /// Width (px) reserved per grid column when computing a minimum grid width.
    pub min_column_width_px: u32,

    /// Upper bound (px) for the computed minimum grid width.
    pub max_grid_width_px: u32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            form_columns: 2,
            required_message: "Can not be empty".to_string(),
            invalid_message: "Not valid".to_string(),
            set_error_message: "Value could not be set".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            template_separator: "<br/>".to_string(),
            true_text: "Yes".to_string(),
            false_text: "No".to_string(),
            min_column_width_px: 120,
            max_grid_width_px: 800,
        }
    }
}

impl EnvironmentConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from TOML text; absent keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.form_columns == 0 {
            return Err(ConfigError::InvalidValue(
                "form_columns",
                "must be at least 1".to_string(),
            ));
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "date_format",
                "must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
