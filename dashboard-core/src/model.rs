use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Forecast entries are 3 hours apart, so every 8th one is roughly a day later.
pub const DAILY_STRIDE: usize = 8;

/// At most this many daily cards are shown.
pub const MAX_DAILY_CARDS: usize = 5;

/// A trimmed, non-empty city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery(String);

impl WeatherQuery {
    /// Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn city(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot readings for a location at query time. Always metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    /// Short keyword such as "Rain" or "Clouds".
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub wind_speed_mps: f64,
    pub observed_at: DateTime<Utc>,
}

impl CurrentConditions {
    /// "Paris, FR", or just the city when the country is unknown.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.location.clone()
        } else {
            format!("{}, {}", self.location, self.country)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

/// 3-hourly forecast, oldest entry first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub city: String,
    pub country: String,
    pub entries: Vec<ForecastEntry>,
}

impl ForecastSeries {
    /// One entry per day, approximated by sampling every 8th entry.
    pub fn daily(&self) -> impl Iterator<Item = &ForecastEntry> {
        self.entries.iter().step_by(DAILY_STRIDE).take(MAX_DAILY_CARDS)
    }
}

/// The current/forecast pair produced by one successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: ForecastSeries,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(hours: i64) -> ForecastEntry {
        ForecastEntry {
            time: Utc.timestamp_opt(1_700_000_000 + hours * 3600, 0).unwrap(),
            temperature_c: hours as f64,
            condition: "Clear".into(),
            description: "clear sky".into(),
            icon: "01d".into(),
        }
    }

    fn series(len: i64) -> ForecastSeries {
        ForecastSeries {
            city: "Paris".into(),
            country: "FR".into(),
            entries: (0..len).map(|i| entry(i * 3)).collect(),
        }
    }

    #[test]
    fn query_is_trimmed_and_rejects_blank() {
        assert_eq!(WeatherQuery::parse("  Paris ").unwrap().city(), "Paris");
        assert!(WeatherQuery::parse("").is_none());
        assert!(WeatherQuery::parse(" \t\n").is_none());
    }

    #[test]
    fn daily_samples_every_eighth_entry() {
        // A full 5-day feed has 40 entries.
        let s = series(40);
        let hours: Vec<f64> = s.daily().map(|e| e.temperature_c).collect();
        assert_eq!(hours, vec![0.0, 24.0, 48.0, 72.0, 96.0]);
    }

    #[test]
    fn daily_is_capped_at_five() {
        let s = series(100);
        assert_eq!(s.daily().count(), MAX_DAILY_CARDS);
    }

    #[test]
    fn daily_handles_short_series() {
        assert_eq!(series(0).daily().count(), 0);
        assert_eq!(series(1).daily().count(), 1);
        assert_eq!(series(9).daily().count(), 2);
    }

    #[test]
    fn display_name_omits_missing_country() {
        let mut current = CurrentConditions {
            location: "Paris".into(),
            country: "FR".into(),
            temperature_c: 18.0,
            feels_like_c: 17.0,
            humidity_pct: 60,
            pressure_hpa: 1012,
            condition: "Clear".into(),
            description: "clear sky".into(),
            icon: "01d".into(),
            wind_speed_mps: 3.0,
            observed_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        };
        assert_eq!(current.display_name(), "Paris, FR");
        current.country.clear();
        assert_eq!(current.display_name(), "Paris");
    }
}
