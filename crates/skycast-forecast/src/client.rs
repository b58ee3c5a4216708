//! Open-Meteo daily forecast client.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{DailyForecast, ForecastDay, PROVIDER_MAX_DAYS};
use skycast_core::ForecastError;
use skycast_geo::Location;

/// The fixed daily metric set requested from the provider.
const DAILY_METRICS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max,weathercode";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailySeries>,
}

/// Parallel arrays aligned by index, as the provider returns them.
#[derive(Debug, Deserialize)]
struct DailySeries {
    time: Vec<NaiveDate>,
    temperature_2m_min: Vec<f64>,
    temperature_2m_max: Vec<f64>,
    precipitation_sum: Vec<f64>,
    wind_speed_10m_max: Vec<f64>,
    weathercode: Vec<i32>,
}

impl DailySeries {
    fn day(&self, i: usize) -> Result<ForecastDay, ForecastError> {
        let short = || ForecastError::InvalidResponse("daily series arrays are misaligned".into());
        Ok(ForecastDay {
            date: *self.time.get(i).ok_or_else(short)?,
            temp_min: *self.temperature_2m_min.get(i).ok_or_else(short)?,
            temp_max: *self.temperature_2m_max.get(i).ok_or_else(short)?,
            precipitation_mm: *self.precipitation_sum.get(i).ok_or_else(short)?,
            wind_max: *self.wind_speed_10m_max.get(i).ok_or_else(short)?,
            weather_code: *self.weathercode.get(i).ok_or_else(short)?,
        })
    }
}

/// Client for the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ForecastError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a daily forecast for a location.
    ///
    /// The requested horizon is clamped to `[1, PROVIDER_MAX_DAYS]` before
    /// going upstream, and rendering is further bounded by the length of
    /// the series actually returned. `truncated` is set iff the caller
    /// asked for more than the provider maximum.
    #[instrument(skip(self, location), fields(label = %location.label()), level = "info")]
    pub async fn daily(
        &self,
        location: &Location,
        requested_days: u32,
    ) -> Result<DailyForecast, ForecastError> {
        let clamped = requested_days.clamp(1, PROVIDER_MAX_DAYS);

        let url = format!("{}/v1/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", clamped.to_string()),
                ("daily", DAILY_METRICS.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ForecastError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::InvalidResponse(e.to_string()))?;

        let series = body
            .daily
            .ok_or_else(|| ForecastError::InvalidResponse("missing daily series".into()))?;

        // Never trust the provider to honor forecast_days exactly.
        let day_count = (clamped as usize).min(series.time.len());
        let mut days = Vec::with_capacity(day_count);
        for i in 0..day_count {
            days.push(series.day(i)?);
        }

        tracing::debug!(days = days.len(), requested = requested_days, "forecast fetched");
        Ok(DailyForecast {
            label: location.label(),
            days,
            truncated: requested_days > PROVIDER_MAX_DAYS,
        })
    }
}
