//! `TripWeather` - single-day hourly weather lookup
//!
//! This library provides the core pipeline behind an interactive weather
//! dashboard: resolving a place name (or map click) into a coordinate,
//! fetching the hourly forecast for one calendar date, and deriving the
//! presentation data (hour labels, extreme-weather list, wind chart
//! colors, CSV table).

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod models;
pub mod report;
pub mod selector;

// Re-export core types for public API
pub use app::{CycleInputs, Notice, NoticeLevel, RenderCycle, RenderResult};
pub use cache::SessionCache;
pub use config::TripWeatherConfig;
pub use error::TripWeatherError;
pub use forecast::ForecastClient;
pub use geocode::{fallback_coordinate, GeocodeClient, ResolvedVia, Resolution};
pub use models::{Coordinate, HourlySeries};
pub use selector::select_location;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripWeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
