//! Coordinate resolution
//!
//! Turns a free-text place name into a coordinate via a Nominatim-style
//! geocoding call, with a static local fallback table for when the remote
//! service cannot be reached and a session cache so repeated queries for
//! the same input never hit the network twice.

use crate::cache::SessionCache;
use crate::config::TripWeatherConfig;
use crate::models::Coordinate;
use crate::{Result, TripWeatherError};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Known city coordinates used when the remote geocoder is unreachable.
/// Keyed by normalized (trimmed, lower-cased) city name; fixed at build time.
static FALLBACK_CITIES: LazyLock<HashMap<&'static str, Coordinate>> = LazyLock::new(|| {
    HashMap::from([
        ("mojokerto", Coordinate::new(-7.4722, 112.4333)),
        ("surabaya", Coordinate::new(-7.2575, 112.7521)),
        ("sidoarjo", Coordinate::new(-7.45, 112.7167)),
        ("malang", Coordinate::new(-7.9839, 112.6214)),
        ("jakarta", Coordinate::new(-6.2, 106.8)),
        ("bandung", Coordinate::new(-6.9147, 107.6098)),
        ("semarang", Coordinate::new(-6.9667, 110.4167)),
    ])
});

/// Normalize a place name for fallback-table lookup
#[must_use]
pub fn normalize_place(place: &str) -> String {
    place.trim().to_lowercase()
}

/// Look up a place in the static fallback table under normalization
#[must_use]
pub fn fallback_coordinate(place: &str) -> Option<Coordinate> {
    FALLBACK_CITIES.get(normalize_place(place).as_str()).copied()
}

/// How a resolution was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    /// The remote geocoding service answered with a candidate
    Geocoder,
    /// The remote call failed and the static table supplied the coordinate
    FallbackTable,
}

/// A successfully resolved place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub coordinate: Coordinate,
    pub via: ResolvedVia,
}

/// Outcome memoized per exact input string, failures included
#[derive(Debug, Clone)]
enum CachedOutcome {
    Resolved(Resolution),
    NotFound,
    Unresolved { message: String },
}

/// Single geocoding candidate from a Nominatim-style search response.
/// The service delivers `lat`/`lon` as strings.
#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    lat: String,
    lon: String,
}

/// Client for the remote geocoding service with local fallback
pub struct GeocodeClient {
    client: reqwest::blocking::Client,
    base_url: String,
    cache: SessionCache<CachedOutcome>,
}

impl GeocodeClient {
    /// Create a new geocoding client from configuration
    pub fn new(config: &TripWeatherConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.geocoding.timeout_seconds.into()))
            .user_agent(config.geocoding.user_agent.clone())
            .build()
            .map_err(|e| TripWeatherError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.geocoding.base_url.clone(),
            cache: SessionCache::new(),
        })
    }

    /// Resolve a place name into a coordinate.
    ///
    /// The caller is responsible for skipping empty input; this method
    /// expects a non-empty place name. Outcomes are memoized per exact
    /// input string for the lifetime of the client.
    pub fn resolve(&mut self, place: &str) -> Result<Resolution> {
        if let Some(outcome) = self.cache.get(place) {
            return Self::into_result(place, outcome);
        }

        let outcome = self.resolve_uncached(place);
        self.cache.put(place.to_string(), outcome.clone());
        Self::into_result(place, outcome)
    }

    /// Number of memoized resolutions (successes and failures) this session
    #[must_use]
    pub fn cached_lookups(&self) -> usize {
        self.cache.len()
    }

    fn resolve_uncached(&self, place: &str) -> CachedOutcome {
        match self.query_geocoder(place) {
            Ok(Some(coordinate)) => {
                debug!(
                    "geocoded '{}' to {}",
                    place,
                    coordinate.format_coordinates()
                );
                CachedOutcome::Resolved(Resolution {
                    coordinate,
                    via: ResolvedVia::Geocoder,
                })
            }
            // Reachable service, zero candidates: the fallback table is keyed
            // on exact known cities and is unlikely to help here, so no
            // fallback is attempted in this branch.
            Ok(None) => {
                warn!("geocoder returned no candidates for '{place}'");
                CachedOutcome::NotFound
            }
            Err(e) => {
                let normalized = normalize_place(place);
                match FALLBACK_CITIES.get(normalized.as_str()) {
                    Some(&coordinate) => {
                        info!("geocoding failed ({e:#}), using local coordinates for '{normalized}'");
                        CachedOutcome::Resolved(Resolution {
                            coordinate,
                            via: ResolvedVia::FallbackTable,
                        })
                    }
                    None => {
                        error!("geocoding failed ({e:#}) and '{normalized}' is not in the local table");
                        CachedOutcome::Unresolved {
                            message: format!("{e:#}"),
                        }
                    }
                }
            }
        }
    }

    /// Query the remote geocoder for the best candidate.
    ///
    /// `Ok(None)` means the service was reachable but had no match; any
    /// transport or protocol problem (network error, non-2xx status,
    /// undecodable body, unparsable coordinates) is an `Err` and routes
    /// the caller to the fallback table.
    fn query_geocoder(&self, place: &str) -> anyhow::Result<Option<Coordinate>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(place)
        );
        debug!("geocoding request URL: {url}");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("geocoding request returned HTTP {status}");
        }

        let candidates: Vec<GeocodeCandidate> = response
            .json()
            .context("failed to decode geocoding response")?;

        let Some(first) = candidates.into_iter().next() else {
            return Ok(None);
        };

        let latitude = first
            .lat
            .parse::<f64>()
            .with_context(|| format!("unparsable latitude '{}'", first.lat))?;
        let longitude = first
            .lon
            .parse::<f64>()
            .with_context(|| format!("unparsable longitude '{}'", first.lon))?;

        Ok(Some(Coordinate::new(latitude, longitude)))
    }

    fn into_result(place: &str, outcome: CachedOutcome) -> Result<Resolution> {
        match outcome {
            CachedOutcome::Resolved(resolution) => Ok(resolution),
            CachedOutcome::NotFound => Err(TripWeatherError::not_found(place)),
            CachedOutcome::Unresolved { message } => {
                Err(TripWeatherError::unresolved(place, message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_place() {
        assert_eq!(normalize_place("  Surabaya "), "surabaya");
        assert_eq!(normalize_place("JAKARTA"), "jakarta");
        assert_eq!(normalize_place("bandung"), "bandung");
    }

    #[test]
    fn test_fallback_coordinate_hit() {
        let coordinate = fallback_coordinate(" SURABAYA ").unwrap();
        assert_eq!(coordinate, Coordinate::new(-7.2575, 112.7521));
    }

    #[test]
    fn test_fallback_coordinate_miss() {
        assert!(fallback_coordinate("atlantis").is_none());
    }

    #[test]
    fn test_candidate_parsing() {
        let body = r#"[{"lat": "-7.2575", "lon": "112.7521", "display_name": "Surabaya"}]"#;
        let candidates: Vec<GeocodeCandidate> = serde_json::from_str(body).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].lat.parse::<f64>().unwrap(), -7.2575);
        assert_eq!(candidates[0].lon.parse::<f64>().unwrap(), 112.7521);
    }

    #[test]
    fn test_empty_candidate_list_parses() {
        let candidates: Vec<GeocodeCandidate> = serde_json::from_str("[]").unwrap();
        assert!(candidates.is_empty());
    }
}
