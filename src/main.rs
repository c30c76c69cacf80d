use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;
use tripweather::models::open_meteo::weather_code_to_description;
use tripweather::{
    report, selector, CycleInputs, HourlySeries, NoticeLevel, RenderCycle, TripWeatherConfig,
};

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .init();
}

/// Positional args: an optional place (city name or "lat,lon" pair, the
/// latter standing in for a map click) and an optional ISO date.
fn parse_args() -> Result<(Option<String>, Option<NaiveDate>)> {
    let mut args = std::env::args().skip(1);
    let place = args.next().filter(|p| !p.trim().is_empty());
    let date = match args.next() {
        Some(raw) => Some(
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))?,
        ),
        None => None,
    };
    Ok((place, date))
}

fn print_table(series: &HourlySeries) {
    let labels = report::hour_labels(&series.time);
    println!(
        "{:>5}  {:>7}  {:>7}  {:>7}  {:>4}  {:>6}  {:>5}  Sky",
        "Hour", "Temp °C", "Rain mm", "Cloud %", "RH %", "Wind", "Dir °"
    );
    for i in 0..series.len() {
        println!(
            "{:>5}  {:>7.1}  {:>7.1}  {:>7}  {:>4}  {:>6.1}  {:>5}  {}",
            labels[i],
            series.temperature[i],
            series.precipitation[i],
            series.cloud_cover[i],
            series.relative_humidity[i],
            series.wind_speed[i],
            series.wind_direction[i],
            weather_code_to_description(series.weather_code[i]),
        );
    }
}

fn main() -> Result<()> {
    let config = TripWeatherConfig::load()?;
    init_tracing(&config.logging.level);

    let (input, date) = parse_args()?;
    let today = Local::now().date_naive();
    let date = date.unwrap_or(today);
    if date < today {
        anyhow::bail!("date {date} is in the past, pick today or a later day");
    }

    // A "lat,lon" argument plays the role of the map click.
    let (place, map_click) = match input {
        Some(raw) => match selector::parse_coordinate_pair(&raw) {
            Some(coordinate) => (None, Some(coordinate)),
            None => (Some(raw), None),
        },
        None => (None, None),
    };

    let mut cycle = RenderCycle::new(&config)?;
    let result = cycle.run(&CycleInputs {
        place,
        map_click,
        date,
    });

    for notice in &result.notices {
        match notice.level {
            NoticeLevel::Info => println!("note: {}", notice.message),
            NoticeLevel::Warning => eprintln!("warning: {}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }

    let Some(series) = &result.series else {
        if result.halted() {
            std::process::exit(1);
        }
        println!("Enter a city name or a lat,lon pair (and optionally a date) to see the hourly forecast.");
        return Ok(());
    };

    if let Some(coordinate) = result.coordinate {
        println!(
            "Hourly weather for {} on {date}",
            coordinate.format_coordinates()
        );
    }
    print_table(series);

    if result.extreme_hours.is_empty() {
        println!("No extreme weather expected.");
    } else {
        println!("Extreme weather expected at:");
        for hour in &result.extreme_hours {
            println!("  - {hour}");
        }
    }

    let csv_path = Path::new("hourly_weather.csv");
    report::write_csv(series, csv_path)?;
    println!("Saved hourly table to {}", csv_path.display());

    Ok(())
}
