//! Derived presentation data
//!
//! Computations the presentation layer consumes: per-hour axis labels,
//! the extreme-weather listing, deterministic wind-chart colors and the
//! CSV rendering of the hourly table.

use crate::models::HourlySeries;
use crate::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Weather codes at or above this value count as extreme weather
pub const EXTREME_WEATHER_CODE: u8 = 80;

/// Fixed wind-chart palette, cycled by hour index
pub const WIND_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Per-hour axis labels: the trailing `HH:MM` of each ISO timestamp,
/// in input order.
#[must_use]
pub fn hour_labels(times: &[String]) -> Vec<String> {
    times.iter().map(|t| hour_label(t)).collect()
}

fn hour_label(timestamp: &str) -> String {
    let count = timestamp.chars().count();
    timestamp.chars().skip(count.saturating_sub(5)).collect()
}

/// Timestamps of all extreme-weather hours, in chronological order,
/// with the date/time separator replaced by a space.
#[must_use]
pub fn extreme_hours(series: &HourlySeries) -> Vec<String> {
    series
        .time
        .iter()
        .zip(&series.weather_code)
        .filter(|&(_, &code)| code >= EXTREME_WEATHER_CODE)
        .map(|(time, _)| time.replace('T', " "))
        .collect()
}

/// Wind-chart color per hour: index `i` always gets `WIND_PALETTE[i % 10]`,
/// for any series length.
#[must_use]
pub fn wind_colors(hours: usize) -> Vec<&'static str> {
    (0..hours).map(|i| WIND_PALETTE[i % WIND_PALETTE.len()]).collect()
}

/// Render the hourly table as CSV: a header row of the series field
/// names, one comma-separated row per hour, no index column.
#[must_use]
pub fn to_csv(series: &HourlySeries) -> String {
    let mut out = String::from(
        "time,temperature,precipitation,cloud_cover,weather_code,relative_humidity,wind_speed,wind_direction\n",
    );
    for i in 0..series.len() {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            series.time[i],
            series.temperature[i],
            series.precipitation[i],
            series.cloud_cover[i],
            series.weather_code[i],
            series.relative_humidity[i],
            series.wind_speed[i],
            series.wind_direction[i],
        );
    }
    out
}

/// Write the CSV rendering of the hourly table to a file, UTF-8 encoded
pub fn write_csv(series: &HourlySeries, path: &Path) -> Result<()> {
    std::fs::write(path, to_csv(series))?;
    Ok(())
}
