//! Location selection
//!
//! Merges the two coordinate sources of an interaction — the resolved
//! typed place name and the map click — into one authoritative coordinate.

use crate::models::Coordinate;

/// Pick the authoritative coordinate for the current interaction.
///
/// A map click, when present, overrides any previously resolved
/// typed-name coordinate. Returns `None` when neither source produced a
/// coordinate; the forecast fetch must then be skipped.
#[must_use]
pub fn select_location(
    typed: Option<Coordinate>,
    clicked: Option<Coordinate>,
) -> Option<Coordinate> {
    clicked.or(typed)
}

/// Parse a "lat,lon" (or "lat lon") pair into a coordinate.
///
/// Stand-in for the map-click event at the CLI boundary. Anything that is
/// not two numbers within the valid ranges is treated as a place name.
#[must_use]
pub fn parse_coordinate_pair(input: &str) -> Option<Coordinate> {
    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 2 {
        return None;
    }

    let latitude = parts[0].parse::<f64>().ok()?;
    let longitude = parts[1].parse::<f64>().ok()?;

    let coordinate = Coordinate::new(latitude, longitude);
    coordinate.validate().ok()?;
    Some(coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_click_overrides_typed() {
        let typed = Some(Coordinate::new(-7.2575, 112.7521));
        let clicked = Some(Coordinate::new(-6.2, 106.8));
        assert_eq!(select_location(typed, clicked), clicked);
    }

    #[test]
    fn test_typed_used_without_click() {
        let typed = Some(Coordinate::new(-7.2575, 112.7521));
        assert_eq!(select_location(typed, None), typed);
    }

    #[test]
    fn test_no_sources_yields_none() {
        assert_eq!(select_location(None, None), None);
    }

    #[rstest]
    #[case("-7.2575,112.7521", -7.2575, 112.7521)]
    #[case("-7.2575 112.7521", -7.2575, 112.7521)]
    #[case("46.8182, 8.2275", 46.8182, 8.2275)]
    fn test_parse_coordinate_pair(#[case] input: &str, #[case] lat: f64, #[case] lon: f64) {
        assert_eq!(
            parse_coordinate_pair(input),
            Some(Coordinate::new(lat, lon))
        );
    }

    #[rstest]
    #[case("Surabaya")]
    #[case("91.0,8.0")]
    #[case("46.0,181.0")]
    #[case("46.0")]
    #[case("46.0,8.0,0.0")]
    fn test_parse_coordinate_pair_rejects(#[case] input: &str) {
        assert_eq!(parse_coordinate_pair(input), None);
    }
}
