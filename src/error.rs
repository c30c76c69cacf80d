//! Error types and handling for the `TripWeather` application

use thiserror::Error;

/// Main error type for the `TripWeather` application
#[derive(Error, Debug)]
pub enum TripWeatherError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Geocoding service was reachable but returned no candidates
    #[error("No match for place '{place}'")]
    GeocodeNotFound { place: String },

    /// Remote geocoding failed and the place is not in the local table
    #[error("Could not resolve place '{place}': {message}")]
    GeocodeAndFallbackFailed { place: String, message: String },

    /// Forecast retrieval errors (network failure, non-200, no hourly section)
    #[error("Forecast fetch failed: {message}")]
    ForecastFetch { message: String },

    /// Forecast body decoded but the hourly arrays are partial or misaligned
    #[error("Malformed forecast response: {message}")]
    MalformedResponse { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripWeatherError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error for a place name
    pub fn not_found<S: Into<String>>(place: S) -> Self {
        Self::GeocodeNotFound {
            place: place.into(),
        }
    }

    /// Create a new error for a place that neither the geocoder nor the local table resolved
    pub fn unresolved<S: Into<String>, M: Into<String>>(place: S, message: M) -> Self {
        Self::GeocodeAndFallbackFailed {
            place: place.into(),
            message: message.into(),
        }
    }

    /// Create a new forecast fetch error
    pub fn forecast<S: Into<String>>(message: S) -> Self {
        Self::ForecastFetch {
            message: message.into(),
        }
    }

    /// Create a new malformed-response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripWeatherError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TripWeatherError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripWeatherError::GeocodeNotFound { place } => {
                format!("Place '{place}' was not found. Try a more complete place name.")
            }
            TripWeatherError::GeocodeAndFallbackFailed { place, .. } => {
                format!(
                    "Could not fetch coordinates for '{place}' from the internet, and the place is not in the local data."
                )
            }
            TripWeatherError::ForecastFetch { .. } | TripWeatherError::MalformedResponse { .. } => {
                "Weather data is not available for this location and date.".to_string()
            }
            TripWeatherError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
