//! Display-time unit conversion. Stored data is always metric.

use serde::{Deserialize, Serialize};

const MPS_TO_MPH: f64 = 2.23694;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn mps_to_mph(mps: f64) -> f64 {
    mps * MPS_TO_MPH
}

impl UnitSystem {
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    pub fn temperature_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    pub fn speed_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }

    /// Convert a Celsius reading into this system.
    pub fn temperature(self, celsius: f64) -> f64 {
        match self {
            UnitSystem::Metric => celsius,
            UnitSystem::Imperial => celsius_to_fahrenheit(celsius),
        }
    }

    /// Convert a metres-per-second reading into this system.
    pub fn speed(self, mps: f64) -> f64 {
        match self {
            UnitSystem::Metric => mps,
            UnitSystem::Imperial => mps_to_mph(mps),
        }
    }

    /// Rounded to whole degrees, e.g. `"18°C"`.
    pub fn format_temperature(self, celsius: f64) -> String {
        // adding 0.0 turns -0.0 into 0.0
        let degrees = self.temperature(celsius).round() + 0.0;
        format!("{degrees:.0}{}", self.temperature_unit())
    }

    /// One decimal place, e.g. `"2.2 mph"`.
    pub fn format_speed(self, mps: f64) -> String {
        format!("{:.1} {}", self.speed(mps), self.speed_unit())
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Metric => f.write_str("metric"),
            UnitSystem::Imperial => f.write_str("imperial"),
        }
    }
}
