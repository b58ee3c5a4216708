use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Durable user store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Geocoding (city search) settings
    #[serde(default)]
    pub geo: GeoConfig,

    /// Forecast provider settings
    #[serde(default)]
    pub forecast: ForecastConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON snapshot holding all user records
    pub users_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            users_file: default_config_dir().join("users.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Base URL of the Open-Meteo geocoding API
    pub base_url: String,

    /// Language code passed through to the provider
    pub language: String,

    /// Maximum number of candidates requested per search
    pub search_limit: u8,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://geocoding-api.open-meteo.com".to_string(),
            language: "ru".to_string(),
            search_limit: 5,
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL of the Open-Meteo forecast API
    pub base_url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com".to_string(),
            timeout_secs: 20,
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skycast")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            store: StoreConfig::default(),
            geo: GeoConfig::default(),
            forecast: ForecastConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.geo.base_url, "geo.base_url", &mut result);
        self.validate_url(&self.forecast.base_url, "forecast.base_url", &mut result);

        if self.geo.search_limit == 0 {
            result.add_error("geo.search_limit", "Search limit must be greater than 0");
        } else if self.geo.search_limit > 10 {
            result.add_warning(
                "geo.search_limit",
                "Search limit is unusually large (>10); the provider may cap it",
            );
        }

        if self.geo.timeout_secs == 0 {
            result.add_error("geo.timeout_secs", "Timeout must be greater than 0");
        }

        if self.forecast.timeout_secs == 0 {
            result.add_error("forecast.timeout_secs", "Timeout must be greater than 0");
        }

        if self.geo.language.is_empty() {
            result.add_warning("geo.language", "Language is empty; provider default applies");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        Ok(default_config_dir().join("config.toml"))
    }
}
