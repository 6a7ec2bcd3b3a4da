//! demos/daily_profiles.rs
//!
//! Builds daily load profiles from a synthetic year of 15-minute readings and
//! plots the summer Monday profile with its confidence band.
//!
//! To run this demo:
//! cargo run --example daily_profiles --features plotting

use std::error::Error;

use chrono::{NaiveDate, TimeDelta, Timelike};
use edautils::{daily_profiles, SeasonClassifier, DEFAULT_CONFIDENCE};
use plotlars::{Line, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or("invalid start date")?;

    // A base load with a midday peak plus a deterministic wobble per reading.
    let timestamps: Vec<_> = (0..365 * 96)
        .map(|i| start + TimeDelta::minutes(15 * i))
        .collect();
    let values: Vec<f64> = timestamps
        .iter()
        .enumerate()
        .map(|(i, ts)| {
            let hour = ts.hour() as f64 + ts.minute() as f64 / 60.0;
            let peak = (-(hour - 12.5).powi(2) / 8.0).exp();
            0.4 + 1.6 * peak + 0.1 * ((i * 7919) % 13) as f64 / 13.0
        })
        .collect();
    let readings = df! { "timestamp" => timestamps, "value" => values }?;

    println!("Computing daily profiles...");
    let profiles = daily_profiles(&readings, DEFAULT_CONFIDENCE, &SeasonClassifier::default())?;
    let summer_monday = profiles
        .lazy()
        .filter(col("season").eq(lit("Summer")))
        .filter(col("weekday").eq(lit("Monday")))
        .collect()?;
    println!("{}", summer_monday);

    TimeSeriesPlot::builder()
        .data(&summer_monday)
        .x("dayhour")
        .y("value_median")
        .additional_series(vec!["value_upper", "value_lower"])
        .colors(vec![Rgb(69, 157, 230), Rgb(235, 117, 0), Rgb(235, 117, 0)])
        .lines(vec![Line::Solid, Line::Dash, Line::Dash])
        .plot_title(Text::from("Summer Monday load profile").size(18))
        .x_title("Hour of day")
        .y_title("kWh")
        .build()
        .plot();

    Ok(())
}
