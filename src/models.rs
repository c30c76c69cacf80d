//! Data models for weather information and API responses
//!
//! This module contains the data structures used for representing one day of
//! hourly weather data, including both the internal models and the external
//! API response types.

use crate::{Result, TripWeatherError};
use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that the coordinate lies within the valid latitude/longitude ranges
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(TripWeatherError::validation(format!(
                "Latitude must be between -90 and 90, got: {}",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(TripWeatherError::validation(format!(
                "Longitude must be between -180 and 180, got: {}",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Format coordinate as a "lat, lon" string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One day of hourly weather measurements as parallel arrays.
///
/// Every vector has the same length, and index `i` across all of them
/// describes the same hour. Instances are only built through
/// [`HourlySeries::from_open_meteo`], which enforces the alignment.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HourlySeries {
    /// ISO timestamps (`YYYY-MM-DDTHH:MM`), one per hour
    pub time: Vec<String>,
    /// Temperature at 2m in °C
    pub temperature: Vec<f32>,
    /// Precipitation in mm
    pub precipitation: Vec<f32>,
    /// Cloud cover percentage (0-100)
    pub cloud_cover: Vec<u8>,
    /// WMO weather code (higher means more severe)
    pub weather_code: Vec<u8>,
    /// Relative humidity at 2m, percentage (0-100)
    pub relative_humidity: Vec<u8>,
    /// Wind speed at 10m
    pub wind_speed: Vec<f32>,
    /// Wind direction at 10m in degrees (0-360, where 0/360 is North)
    pub wind_direction: Vec<u16>,
}

impl HourlySeries {
    /// Build a validated series from the raw Open-Meteo hourly arrays.
    ///
    /// Every requested field must be present and have exactly as many
    /// entries as the `time` array; anything else is a malformed response.
    pub fn from_open_meteo(hourly: open_meteo::HourlyData) -> Result<Self> {
        let expected = hourly.time.len();

        let temperature = require_field("temperature_2m", hourly.temperature, expected)?;
        let precipitation = require_field("precipitation", hourly.precipitation, expected)?;
        let cloud_cover = require_field("cloudcover", hourly.cloud_cover, expected)?;
        let weather_code = require_field("weathercode", hourly.weather_code, expected)?;
        let relative_humidity =
            require_field("relativehumidity_2m", hourly.relative_humidity, expected)?;
        let wind_speed = require_field("windspeed_10m", hourly.wind_speed, expected)?;
        let wind_direction = require_field("winddirection_10m", hourly.wind_direction, expected)?;

        Ok(Self {
            time: hourly.time,
            temperature,
            precipitation,
            cloud_cover,
            weather_code,
            relative_humidity,
            wind_speed,
            wind_direction,
        })
    }

    /// Number of hours in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series contains no hours
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

fn require_field<T>(name: &str, values: Option<Vec<T>>, expected: usize) -> Result<Vec<T>> {
    let values = values
        .ok_or_else(|| TripWeatherError::malformed(format!("hourly field '{name}' is missing")))?;
    if values.len() != expected {
        return Err(TripWeatherError::malformed(format!(
            "hourly field '{name}' has {} entries, expected {expected}",
            values.len()
        )));
    }
    Ok(values)
}

/// Open-Meteo API response structures
pub mod open_meteo {
    use serde::Deserialize;

    /// Forecast response from the Open-Meteo API
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub latitude: f64,
        pub longitude: f64,
        pub hourly: Option<HourlyData>,
    }

    /// Hourly weather arrays from Open-Meteo
    #[derive(Debug, Deserialize)]
    pub struct HourlyData {
        pub time: Vec<String>,
        #[serde(rename = "temperature_2m")]
        pub temperature: Option<Vec<f32>>,
        pub precipitation: Option<Vec<f32>>,
        #[serde(rename = "cloudcover")]
        pub cloud_cover: Option<Vec<u8>>,
        #[serde(rename = "weathercode")]
        pub weather_code: Option<Vec<u8>>,
        #[serde(rename = "relativehumidity_2m")]
        pub relative_humidity: Option<Vec<u8>>,
        #[serde(rename = "windspeed_10m")]
        pub wind_speed: Option<Vec<f32>>,
        #[serde(rename = "winddirection_10m")]
        pub wind_direction: Option<Vec<u16>>,
    }

    /// Convert an Open-Meteo weather code to a human-readable description
    #[must_use]
    pub fn weather_code_to_description(code: u8) -> &'static str {
        match code {
            0 => "Clear sky",
            1 => "Mainly clear",
            2 => "Partly cloudy",
            3 => "Overcast",
            45 => "Fog",
            48 => "Depositing rime fog",
            51 => "Light drizzle",
            53 => "Moderate drizzle",
            55 => "Dense drizzle",
            56 => "Light freezing drizzle",
            57 => "Dense freezing drizzle",
            61 => "Slight rain",
            63 => "Moderate rain",
            65 => "Heavy rain",
            66 => "Light freezing rain",
            67 => "Heavy freezing rain",
            71 => "Slight snow fall",
            73 => "Moderate snow fall",
            75 => "Heavy snow fall",
            77 => "Snow grains",
            80 => "Slight rain showers",
            81 => "Moderate rain showers",
            82 => "Violent rain showers",
            85 => "Slight snow showers",
            86 => "Heavy snow showers",
            95 => "Thunderstorm",
            96 => "Thunderstorm with slight hail",
            99 => "Thunderstorm with heavy hail",
            _ => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hourly(len: usize) -> open_meteo::HourlyData {
        open_meteo::HourlyData {
            time: (0..len).map(|h| format!("2026-08-07T{h:02}:00")).collect(),
            temperature: Some(vec![27.5; len]),
            precipitation: Some(vec![0.0; len]),
            cloud_cover: Some(vec![40; len]),
            weather_code: Some(vec![2; len]),
            relative_humidity: Some(vec![70; len]),
            wind_speed: Some(vec![3.4; len]),
            wind_direction: Some(vec![180; len]),
        }
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(-7.2575, 112.7521).validate().is_ok());
        assert!(Coordinate::new(91.0, 0.0).validate().is_err());
        assert!(Coordinate::new(0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_format_coordinates() {
        let coordinate = Coordinate::new(-7.2575, 112.7521);
        assert_eq!(coordinate.format_coordinates(), "-7.2575, 112.7521");
    }

    #[test]
    fn test_series_from_aligned_arrays() {
        let series = HourlySeries::from_open_meteo(sample_hourly(24)).unwrap();
        assert_eq!(series.len(), 24);
        assert_eq!(series.temperature.len(), 24);
        assert_eq!(series.wind_direction.len(), 24);
        assert_eq!(series.time[0], "2026-08-07T00:00");
    }

    #[test]
    fn test_series_rejects_missing_field() {
        let mut hourly = sample_hourly(24);
        hourly.relative_humidity = None;
        let err = HourlySeries::from_open_meteo(hourly).unwrap_err();
        assert!(matches!(err, TripWeatherError::MalformedResponse { .. }));
        assert!(err.to_string().contains("relativehumidity_2m"));
    }

    #[test]
    fn test_series_rejects_misaligned_field() {
        let mut hourly = sample_hourly(24);
        hourly.precipitation = Some(vec![0.0; 23]);
        let err = HourlySeries::from_open_meteo(hourly).unwrap_err();
        assert!(matches!(err, TripWeatherError::MalformedResponse { .. }));
    }

    #[test]
    fn test_weather_code_descriptions() {
        assert_eq!(open_meteo::weather_code_to_description(0), "Clear sky");
        assert_eq!(
            open_meteo::weather_code_to_description(82),
            "Violent rain showers"
        );
        assert_eq!(open_meteo::weather_code_to_description(95), "Thunderstorm");
        assert_eq!(open_meteo::weather_code_to_description(42), "Unknown");
    }
}
