//! Render cycle pipeline
//!
//! One explicit `run(inputs)` call per user interaction replaces the
//! original reactive rerun model: resolve the typed place, merge it with
//! the map click, fetch the hourly series and derive the extreme-weather
//! list. Failures become notices and halt the remainder of the cycle;
//! the process itself never dies on a failed cycle.

use crate::config::TripWeatherConfig;
use crate::forecast::ForecastClient;
use crate::geocode::{GeocodeClient, ResolvedVia};
use crate::models::{Coordinate, HourlySeries};
use crate::selector::select_location;
use crate::{report, Result, TripWeatherError};
use chrono::NaiveDate;
use tracing::debug;

/// Inputs of one user interaction
#[derive(Debug, Clone)]
pub struct CycleInputs {
    /// Typed place name, if any; empty or whitespace-only counts as absent
    pub place: Option<String>,
    /// Coordinate from the map click of this interaction, if any
    pub map_click: Option<Coordinate>,
    /// Requested calendar date
    pub date: NaiveDate,
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// User-facing notification emitted during a cycle
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn warning<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    fn error<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Outcome of one render cycle
#[derive(Debug, Default)]
pub struct RenderResult {
    /// The authoritative coordinate, when one was selected
    pub coordinate: Option<Coordinate>,
    /// The fetched hourly series, when the fetch succeeded
    pub series: Option<HourlySeries>,
    /// Extreme-weather timestamps derived from the series
    pub extreme_hours: Vec<String>,
    /// Notices to surface to the user, in emission order
    pub notices: Vec<Notice>,
}

impl RenderResult {
    /// Whether the cycle halted on an error notice
    #[must_use]
    pub fn halted(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

/// Drives one interaction through resolve, select, fetch and derive
pub struct RenderCycle {
    geocoder: GeocodeClient,
    forecast: ForecastClient,
}

impl RenderCycle {
    /// Create a render cycle with clients built from configuration
    pub fn new(config: &TripWeatherConfig) -> Result<Self> {
        Ok(Self {
            geocoder: GeocodeClient::new(config)?,
            forecast: ForecastClient::new(config)?,
        })
    }

    /// Run one render cycle for the given inputs
    pub fn run(&mut self, inputs: &CycleInputs) -> RenderResult {
        let mut result = RenderResult::default();

        let place = inputs
            .place
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());

        let typed = match place {
            None => None,
            Some(place) => match self.geocoder.resolve(place) {
                Ok(resolution) => {
                    if resolution.via == ResolvedVia::FallbackTable {
                        result.notices.push(Notice::info(
                            "Using local coordinates because the geocoding service could not be reached.",
                        ));
                    }
                    Some(resolution.coordinate)
                }
                Err(e @ TripWeatherError::GeocodeNotFound { .. }) => {
                    result.notices.push(Notice::warning(e.user_message()));
                    None
                }
                Err(e) => {
                    result.notices.push(Notice::error(e.user_message()));
                    return result;
                }
            },
        };

        let Some(coordinate) = select_location(typed, inputs.map_click) else {
            debug!("no coordinate available, skipping forecast fetch");
            return result;
        };
        result.coordinate = Some(coordinate);

        match self.forecast.fetch_hourly(coordinate, inputs.date) {
            Ok(series) => {
                result.extreme_hours = report::extreme_hours(&series);
                result.series = Some(series);
            }
            Err(e) => result.notices.push(Notice::error(e.user_message())),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> TripWeatherConfig {
        // Port 9 (discard) refuses connections immediately on loopback.
        let mut config = TripWeatherConfig::default();
        config.geocoding.base_url = "http://127.0.0.1:9".to_string();
        config.forecast.base_url = "http://127.0.0.1:9".to_string();
        config.geocoding.timeout_seconds = 2;
        config.forecast.timeout_seconds = 2;
        config
    }

    fn august_seventh() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn test_empty_inputs_short_circuit() {
        let mut cycle = RenderCycle::new(&offline_config()).unwrap();
        let result = cycle.run(&CycleInputs {
            place: None,
            map_click: None,
            date: august_seventh(),
        });

        assert!(result.coordinate.is_none());
        assert!(result.series.is_none());
        assert!(result.notices.is_empty());
        assert!(!result.halted());
    }

    #[test]
    fn test_whitespace_place_counts_as_absent() {
        let mut cycle = RenderCycle::new(&offline_config()).unwrap();
        let result = cycle.run(&CycleInputs {
            place: Some("   ".to_string()),
            map_click: None,
            date: august_seventh(),
        });

        assert!(result.coordinate.is_none());
        assert!(result.notices.is_empty());
    }

    #[test]
    fn test_click_overrides_resolved_place() {
        let clicked = Coordinate::new(-6.9147, 107.6098);
        let mut cycle = RenderCycle::new(&offline_config()).unwrap();
        let result = cycle.run(&CycleInputs {
            place: Some("Surabaya".to_string()),
            map_click: Some(clicked),
            date: august_seventh(),
        });

        // The fetch against the unreachable endpoint fails, but the click
        // coordinate must have won the selection.
        assert_eq!(result.coordinate, Some(clicked));
        assert!(result.halted());
    }

    #[test]
    fn test_unresolvable_place_halts_cycle() {
        let mut cycle = RenderCycle::new(&offline_config()).unwrap();
        let result = cycle.run(&CycleInputs {
            place: Some("atlantis".to_string()),
            map_click: None,
            date: august_seventh(),
        });

        assert!(result.halted());
        assert!(result.coordinate.is_none());
        assert!(result.series.is_none());
    }

    #[test]
    fn test_fallback_place_reaches_fetch_with_info_notice() {
        let mut cycle = RenderCycle::new(&offline_config()).unwrap();
        let result = cycle.run(&CycleInputs {
            place: Some("Surabaya".to_string()),
            map_click: None,
            date: august_seventh(),
        });

        assert_eq!(result.coordinate, Some(Coordinate::new(-7.2575, 112.7521)));
        assert!(result
            .notices
            .iter()
            .any(|n| n.level == NoticeLevel::Info && n.message.contains("local coordinates")));
        // The forecast endpoint is unreachable too, so the cycle ends in an
        // error notice instead of a series.
        assert!(result.series.is_none());
        assert!(result.halted());
    }
}
