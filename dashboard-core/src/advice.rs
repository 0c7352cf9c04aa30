//! Canned advice derived from the current temperature and condition.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    Umbrella,
    BundleUp,
    Shorts,
    EnjoyDay,
}

impl Advice {
    pub fn message(self) -> &'static str {
        match self {
            Advice::Umbrella => "Don't forget an umbrella.",
            Advice::BundleUp => "Bundle up!",
            Advice::Shorts => "Wear shorts.",
            Advice::EnjoyDay => "Enjoy your day!",
        }
    }
}

impl std::fmt::Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Pick advice for a Celsius temperature and a condition keyword.
///
/// Rules are checked in order and the first match wins: wet conditions,
/// then cold (below 10°C), then hot (above 25°C).
pub fn advise(temperature_c: f64, condition: &str) -> Advice {
    let condition = condition.to_lowercase();

    if condition.contains("rain") || condition.contains("drizzle") {
        return Advice::Umbrella;
    }

    if temperature_c < 10.0 {
        return Advice::BundleUp;
    }

    if temperature_c > 25.0 {
        return Advice::Shorts;
    }

    Advice::EnjoyDay
}
