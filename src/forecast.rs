//! Forecast retrieval
//!
//! Fetches one calendar day of hourly weather data for a coordinate from
//! the Open-Meteo forecast API and parses it into an [`HourlySeries`].
//! One request per cycle; nothing is retried.

use crate::config::TripWeatherConfig;
use crate::models::{open_meteo, Coordinate, HourlySeries};
use crate::{Result, TripWeatherError};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, info};

/// Hourly parameters requested from the forecast endpoint
pub const HOURLY_PARAMS: &str = "temperature_2m,precipitation,cloudcover,weathercode,relativehumidity_2m,windspeed_10m,winddirection_10m";

/// Client for the Open-Meteo forecast endpoint
pub struct ForecastClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ForecastClient {
    /// Create a new forecast client from configuration
    pub fn new(config: &TripWeatherConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.forecast.timeout_seconds.into()))
            .build()
            .map_err(|e| TripWeatherError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.forecast.base_url.clone(),
        })
    }

    /// Fetch the hourly series for one coordinate and one calendar date.
    ///
    /// The date is used as both the start and the end of the query window,
    /// with timezone auto-detection from the coordinate.
    pub fn fetch_hourly(&self, coordinate: Coordinate, date: NaiveDate) -> Result<HourlySeries> {
        let day = date.format("%Y-%m-%d");
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly={}&timezone=auto&start_date={day}&end_date={day}",
            self.base_url, coordinate.latitude, coordinate.longitude, HOURLY_PARAMS
        );
        debug!("forecast request URL: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| TripWeatherError::forecast(format!("network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TripWeatherError::forecast(format!(
                "request returned HTTP {status}"
            )));
        }

        let decoded: open_meteo::ForecastResponse = response
            .json()
            .map_err(|e| TripWeatherError::forecast(format!("undecodable response body: {e}")))?;

        let series = series_from_response(decoded)?;
        info!(
            "fetched {} hourly entries for {} on {day}",
            series.len(),
            coordinate.format_coordinates()
        );
        Ok(series)
    }
}

/// Extract and validate the hourly section of a decoded forecast response
fn series_from_response(decoded: open_meteo::ForecastResponse) -> Result<HourlySeries> {
    let Some(hourly) = decoded.hourly else {
        return Err(TripWeatherError::forecast(
            "response has no hourly section".to_string(),
        ));
    };
    HourlySeries::from_open_meteo(hourly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_hourly_section_is_fetch_failure() {
        let decoded: open_meteo::ForecastResponse =
            serde_json::from_str(r#"{"latitude": -7.25, "longitude": 112.75}"#).unwrap();
        let err = series_from_response(decoded).unwrap_err();
        assert!(matches!(err, TripWeatherError::ForecastFetch { .. }));
    }

    #[test]
    fn test_hourly_section_parses_into_series() {
        let body = r#"{
            "latitude": -7.25,
            "longitude": 112.75,
            "hourly": {
                "time": ["2026-08-07T00:00", "2026-08-07T01:00"],
                "temperature_2m": [26.1, 25.8],
                "precipitation": [0.0, 0.4],
                "cloudcover": [20, 65],
                "weathercode": [1, 80],
                "relativehumidity_2m": [74, 78],
                "windspeed_10m": [4.1, 5.0],
                "winddirection_10m": [120, 135]
            }
        }"#;
        let decoded: open_meteo::ForecastResponse = serde_json::from_str(body).unwrap();
        let series = series_from_response(decoded).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.weather_code, vec![1, 80]);
        assert_eq!(series.time[1], "2026-08-07T01:00");
    }

    #[test]
    fn test_partial_hourly_section_is_malformed() {
        let body = r#"{
            "latitude": -7.25,
            "longitude": 112.75,
            "hourly": {
                "time": ["2026-08-07T00:00"],
                "temperature_2m": [26.1]
            }
        }"#;
        let decoded: open_meteo::ForecastResponse = serde_json::from_str(body).unwrap();
        let err = series_from_response(decoded).unwrap_err();
        assert!(matches!(err, TripWeatherError::MalformedResponse { .. }));
    }

    #[test]
    fn test_hourly_params_cover_all_series_fields() {
        for param in [
            "temperature_2m",
            "precipitation",
            "cloudcover",
            "weathercode",
            "relativehumidity_2m",
            "windspeed_10m",
            "winddirection_10m",
        ] {
            assert!(HOURLY_PARAMS.contains(param));
        }
    }
}
