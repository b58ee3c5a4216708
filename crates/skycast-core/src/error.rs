//! Centralized error types for the Skycast application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for chat display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the Skycast application should be convertible to this type.
/// Use `user_message()` to get a chat-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Geocoding error: {0}")]
    Geo(#[from] GeoError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in a chat reply.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Geo(e) => e.user_message(),
            AppError::Forecast(e) => e.user_message(),
            AppError::Store(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Geocoding (city name search) errors.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Search text was empty after trimming. A usage error, never sent upstream.
    #[error("Empty search query")]
    EmptyQuery,

    #[error("Geocoding provider error: {status} - {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl GeoError {
    pub fn user_message(&self) -> &'static str {
        match self {
            GeoError::EmptyQuery => "Type a city name as text.",
            GeoError::Upstream { .. } | GeoError::InvalidResponse(_) => {
                "City search is unavailable right now. Please try again."
            }
            GeoError::Network(e) if e.is_timeout() => {
                "City search timed out. Please try again."
            }
            GeoError::Network(_) => "City search failed. Check your connection.",
        }
    }

    /// True for transient provider/network conditions, false for usage errors.
    pub fn is_transient(&self) -> bool {
        !matches!(self, GeoError::EmptyQuery)
    }
}

/// Forecast provider errors.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Forecast provider error: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// The daily series was missing or its parallel arrays were shorter
    /// than the advertised day count.
    #[error("Invalid forecast response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ForecastError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ForecastError::Upstream { .. } | ForecastError::InvalidResponse(_) => {
                "The forecast service is unavailable right now. Please try again."
            }
            ForecastError::Network(e) if e.is_timeout() => {
                "The forecast request timed out. Please try again."
            }
            ForecastError::Network(_) => "Forecast request failed. Check your connection.",
        }
    }
}

/// Durable user store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The snapshot file exists but cannot be parsed. Fatal at startup:
    /// the process must not run with unknown user state.
    #[error("User store at {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },

    #[error("Failed to serialize user store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Corrupt { .. } => {
                "Saved data is unreadable. The service cannot start."
            }
            StoreError::Serialize(_) | StoreError::Io(_) => {
                "Failed to save your data. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}
