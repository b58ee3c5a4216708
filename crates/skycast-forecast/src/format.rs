//! Plain-text rendering of a daily forecast.

use crate::types::{DailyForecast, PROVIDER_MAX_DAYS};

/// Render a forecast as one summary text: the location label, a truncation
/// warning when the requested horizon exceeded the provider limit, then one
/// line per day. Units are the provider's, unconverted.
pub fn render(forecast: &DailyForecast) -> String {
    let mut lines = vec![format!("\u{1F4CD} {}", forecast.label)];

    if forecast.truncated {
        lines.push(format!(
            "\u{26A0}\u{FE0F} Only {} days available (forecast provider limit).",
            PROVIDER_MAX_DAYS
        ));
    }

    lines.push(String::new());
    for day in &forecast.days {
        lines.push(format!(
            "{}: {}\u{2026}{}\u{00B0}C, precipitation {} mm, wind up to {} m/s",
            day.date, day.temp_min, day.temp_max, day.precipitation_mm, day.wind_max
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::types::ForecastDay;
    use chrono::NaiveDate;

    fn day(d: u32) -> ForecastDay {
        ForecastDay {
            date: NaiveDate::from_ymd_opt(2026, 9, d).unwrap(),
            temp_min: -3.0,
            temp_max: 5.5,
            precipitation_mm: 2.1,
            wind_max: 14.0,
            weather_code: 61,
        }
    }

    #[test]
    fn render_starts_with_label() {
        let forecast = DailyForecast {
            label: "Berlin, Germany".to_string(),
            days: vec![day(1)],
            truncated: false,
        };
        let text = render(&forecast);
        assert!(text.starts_with("\u{1F4CD} Berlin, Germany"));
    }

    #[test]
    fn render_day_line_has_all_metrics() {
        let forecast = DailyForecast {
            label: "Berlin".to_string(),
            days: vec![day(1)],
            truncated: false,
        };
        let text = render(&forecast);
        assert!(text.contains("2026-09-01: -3\u{2026}5.5\u{00B0}C, precipitation 2.1 mm, wind up to 14 m/s"));
    }

    #[test]
    fn render_truncated_warning_names_provider_limit() {
        let forecast = DailyForecast {
            label: "Berlin".to_string(),
            days: (1..=16).map(day).collect(),
            truncated: true,
        };
        let text = render(&forecast);
        let warning_pos = text.find("Only 16 days available").unwrap();
        let first_day_pos = text.find("2026-09-01").unwrap();
        // Warning precedes the per-day listing.
        assert!(warning_pos < first_day_pos);
    }

    #[test]
    fn render_without_truncation_has_no_warning() {
        let forecast = DailyForecast {
            label: "Berlin".to_string(),
            days: vec![day(1)],
            truncated: false,
        };
        assert!(!render(&forecast).contains("available"));
    }
}
