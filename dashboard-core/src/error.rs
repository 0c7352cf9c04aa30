//! Failure taxonomy for weather lookups.

use thiserror::Error;

/// Fallback text when the provider rejects a request without a message.
pub const DEFAULT_PROVIDER_MESSAGE: &str = "Failed to fetch weather data";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("OpenWeather API key is not configured")]
    Configuration,

    #[error("City not found: {0}")]
    NotFound(String),

    #[error("Provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl WeatherError {
    /// The single line shown to the user when a search fails.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration => "OpenWeather API key is not configured".to_string(),
            Self::NotFound(_) => {
                "City not found. Please check the spelling and try again.".to_string()
            }
            Self::Provider { message, .. } => message.clone(),
            Self::Network(_) => "Network error. Check your connection and try again.".to_string(),
            Self::Parse(_) | Self::Unexpected(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Whether trying the same search again might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_follow_taxonomy() {
        assert!(WeatherError::Configuration.user_message().contains("not configured"));
        assert!(
            WeatherError::NotFound("Atlantis".into())
                .user_message()
                .starts_with("City not found")
        );

        let err = WeatherError::Provider { status: 401, message: "Invalid API key".into() };
        assert_eq!(err.user_message(), "Invalid API key");

        let err = WeatherError::Parse("missing field `main`".into());
        assert!(err.user_message().contains("unexpected"));
    }

    #[test]
    fn only_remote_failures_are_retryable() {
        assert!(!WeatherError::Configuration.is_retryable());
        assert!(!WeatherError::NotFound("x".into()).is_retryable());
        assert!(WeatherError::Provider { status: 500, message: "boom".into() }.is_retryable());
    }
}
