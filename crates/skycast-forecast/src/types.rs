use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum daily horizon the forecast provider supports.
pub const PROVIDER_MAX_DAYS: u32 = 16;

const ICON_BASE_URL: &str = "https://open-meteo.com/assets/icons";

/// One forecast day, provider-native units unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub precipitation_mm: f64,
    pub wind_max: f64,
    /// WMO weather code, kept for the supplementary icon reference.
    pub weather_code: i32,
}

impl ForecastDay {
    /// Icon reference for this day's weather code. A side artifact next to
    /// the textual line, never interleaved into it.
    pub fn icon_url(&self) -> String {
        format!("{}/{}.svg", ICON_BASE_URL, self.weather_code)
    }
}

/// A bounded multi-day forecast for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Derived display label of the forecast location.
    pub label: String,
    pub days: Vec<ForecastDay>,
    /// True iff the requested horizon exceeded the provider maximum.
    pub truncated: bool,
}

impl DailyForecast {
    /// Icon references for the rendered days, in day order.
    pub fn icon_urls(&self) -> Vec<String> {
        self.days.iter().map(ForecastDay::icon_url).collect()
    }
}
