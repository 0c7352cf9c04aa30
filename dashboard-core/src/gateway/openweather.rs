use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    config::Config,
    error::{DEFAULT_PROVIDER_MESSAGE, WeatherError},
    model::{CurrentConditions, ForecastEntry, ForecastSeries, WeatherQuery},
};

use super::WeatherGateway;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Talks to the OpenWeatherMap current-weather and 5 day / 3 hour endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherGateway {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherGateway {
    /// A missing key is only reported when a lookup is attempted.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, WeatherError> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let mut gateway = Self::new(config.resolved_api_key());

        if let Some(base_url) = &config.base_url {
            gateway = gateway.with_base_url(base_url.clone());
        }
        if let Some(secs) = config.request_timeout_secs {
            gateway = gateway.with_timeout(Duration::from_secs(secs))?;
        }

        Ok(gateway)
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key.as_deref().ok_or(WeatherError::Configuration)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &WeatherQuery,
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key()?;
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);

        tracing::debug!(endpoint, city = query.city(), "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", query.city()), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .inspect_err(|err| tracing::warn!(endpoint, error = %err, "OpenWeather unreachable"))?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(endpoint, city = query.city(), "OpenWeather has no such city");
            return Err(WeatherError::NotFound(query.city().to_string()));
        }

        if !status.is_success() {
            let message = provider_message(&body);
            tracing::warn!(endpoint, %status, %message, "OpenWeather request failed");
            return Err(WeatherError::Provider { status: status.as_u16(), message });
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(endpoint, error = %err, body = %truncate_body(&body), "bad OpenWeather JSON");
            WeatherError::Parse(format!("{endpoint}: {err}"))
        })
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherGateway {
    fn ensure_ready(&self) -> Result<(), WeatherError> {
        self.api_key().map(|_| ())
    }

    async fn fetch_current(&self, query: &WeatherQuery) -> Result<CurrentConditions, WeatherError> {
        let parsed: OwCurrentResponse = self.get_json("weather", query).await?;
        Ok(parsed.into())
    }

    async fn fetch_forecast(&self, query: &WeatherQuery) -> Result<ForecastSeries, WeatherError> {
        let parsed: OwForecastResponse = self.get_json("forecast", query).await?;
        Ok(parsed.into())
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwEntryMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwEntryMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

/// (keyword, description, icon) of the primary condition.
fn primary_condition(weather: Vec<OwWeather>) -> (String, String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), "unknown".to_string(), String::new()))
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition, description, icon) = primary_condition(parsed.weather);

        CurrentConditions {
            location: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            condition,
            description,
            icon,
            wind_speed_mps: parsed.wind.speed,
            observed_at: unix_to_utc(parsed.dt).unwrap_or_else(Utc::now),
        }
    }
}

impl From<OwForecastResponse> for ForecastSeries {
    fn from(parsed: OwForecastResponse) -> Self {
        let entries = parsed
            .list
            .into_iter()
            .map(|entry| {
                let (condition, description, icon) = primary_condition(entry.weather);
                ForecastEntry {
                    time: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
                    temperature_c: entry.main.temp,
                    condition,
                    description,
                    icon,
                }
            })
            .collect();

        ForecastSeries {
            city: parsed.city.name,
            country: parsed.city.country.unwrap_or_default(),
            entries,
        }
    }
}

fn provider_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROVIDER_MESSAGE.to_string())
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
