//! Daily forecasts for Skycast via the Open-Meteo forecast API.
//!
//! Requests a bounded daily window, clamps the user horizon to the
//! provider maximum, and renders a single summary text with per-day icon
//! references kept alongside.

pub mod client;
pub mod format;
pub mod types;

pub use client::ForecastClient;
pub use format::render;
pub use types::{DailyForecast, ForecastDay, PROVIDER_MAX_DAYS};
