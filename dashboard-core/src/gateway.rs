use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastSeries, WeatherQuery, WeatherReport},
};

pub mod openweather;

pub use openweather::OpenWeatherGateway;

/// Source of current conditions and forecasts for a city.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    /// Checks that must pass before any request is attempted.
    fn ensure_ready(&self) -> Result<(), WeatherError> {
        Ok(())
    }

    async fn fetch_current(&self, query: &WeatherQuery) -> Result<CurrentConditions, WeatherError>;

    async fn fetch_forecast(&self, query: &WeatherQuery) -> Result<ForecastSeries, WeatherError>;

    /// Both lookups run concurrently; the report exists only if both succeed.
    async fn fetch_report(&self, query: &WeatherQuery) -> Result<WeatherReport, WeatherError> {
        self.ensure_ready()?;

        let (current, forecast) =
            tokio::try_join!(self.fetch_current(query), self.fetch_forecast(query))?;

        Ok(WeatherReport { current, forecast })
    }
}
