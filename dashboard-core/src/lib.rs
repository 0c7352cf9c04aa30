//! Core library for the smart weather dashboard.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeatherMap gateway (current conditions + 5 day forecast)
//! - The advice rule and unit conversions
//! - Persisted recent searches
//! - The dashboard state machine and its formatted view
//!
//! It is used by `dashboard-cli`, but has no terminal dependencies of its own.

pub mod advice;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod model;
pub mod recent;
pub mod storage;
pub mod units;

pub use advice::{Advice, advise};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardView, Phase, SearchTicket};
pub use error::WeatherError;
pub use gateway::{OpenWeatherGateway, WeatherGateway};
pub use model::{CurrentConditions, ForecastEntry, ForecastSeries, WeatherQuery, WeatherReport};
pub use recent::RecentSearches;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use units::UnitSystem;
