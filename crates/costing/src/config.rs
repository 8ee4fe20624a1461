//! Costing configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `BAKEHOUSE_CATALOG` - Path to the catalog file (optional)
//! - `BAKEHOUSE_LABOR_HOUR_RATE` - Overrides the catalog's labor hour rate
//! - `BAKEHOUSE_DEFAULT_MARGIN` - Overrides the catalog's default margin percentage
//! - `BAKEHOUSE_LOG_FORMAT` - `text` (default) or `json`

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::RecipeSettings;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Runtime configuration for the costing tools.
#[derive(Debug, Clone, Default)]
pub struct CostingConfig {
    /// Catalog file to load when none is given on the command line.
    pub catalog_path: Option<PathBuf>,
    /// Replaces `RecipeSettings::labor_hour_rate` when set.
    pub labor_hour_rate: Option<Decimal>,
    /// Replaces `RecipeSettings::default_margin` when set.
    pub default_margin: Option<Decimal>,
    pub log_format: LogFormat,
}

impl CostingConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set to a value
    /// that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`CostingConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_format = get("BAKEHOUSE_LOG_FORMAT")
            .map(|value| {
                value
                    .parse::<LogFormat>()
                    .map_err(|e| ConfigError::InvalidEnvVar("BAKEHOUSE_LOG_FORMAT".to_string(), e))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            catalog_path: get("BAKEHOUSE_CATALOG").map(PathBuf::from),
            labor_hour_rate: parse_decimal("BAKEHOUSE_LABOR_HOUR_RATE", get("BAKEHOUSE_LABOR_HOUR_RATE"))?,
            default_margin: parse_decimal("BAKEHOUSE_DEFAULT_MARGIN", get("BAKEHOUSE_DEFAULT_MARGIN"))?,
            log_format,
        })
    }

    /// Catalog path, preferring an explicit one over the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if neither is set.
    pub fn require_catalog_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        explicit
            .or_else(|| self.catalog_path.clone())
            .ok_or_else(|| ConfigError::MissingEnvVar("BAKEHOUSE_CATALOG".to_string()))
    }

    /// Apply the environment overrides to catalog settings.
    #[must_use]
    pub fn apply_to(&self, mut settings: RecipeSettings) -> RecipeSettings {
        if let Some(rate) = self.labor_hour_rate {
            settings.labor_hour_rate = rate;
        }
        if let Some(margin) = self.default_margin {
            settings.default_margin = margin;
        }
        settings
    }
}

fn parse_decimal(key: &str, value: Option<String>) -> Result<Option<Decimal>, ConfigError> {
    value
        .map(|v| {
            v.trim()
                .parse::<Decimal>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}
