//! Hourly load profiles per season and weekday with a confidence band.

use crate::profiles::error::ProfileError;
use crate::season::classifier::SeasonClassifier;
use crate::types::any_timestamp::AnyTimestamp;
use chrono::NaiveDateTime;
use log::{info, warn};
use polars::prelude::*;

pub const DEFAULT_CONFIDENCE: f64 = 95.0;

/// Aggregates a `(timestamp, value)` series into daily profiles.
///
/// Values are summed per hour first. For every combination of season, weekday and
/// hour of day the result holds the median and the `confidence` and
/// `100 - confidence` percentiles (linear interpolation) of those hourly sums.
///
/// Output columns: `season`, `weekday`, `dayhour`, `value_median`, `value_upper`,
/// `value_lower`; rows ordered by season (spring first), Monday to Sunday, hour.
///
/// The timestamp column may hold datetimes, dates or text; rows with a missing
/// timestamp or value are dropped.
///
/// # Errors
///
/// * [`ProfileError::InvalidConfidence`] unless `50 < confidence <= 100`.
/// * [`ProfileError::ColumnCount`] unless the frame has exactly two columns.
/// * [`ProfileError::InvalidTimestamp`] for unparseable text timestamps.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use edautils::{daily_profiles, SeasonClassifier, DEFAULT_CONFIDENCE};
/// use polars::prelude::*;
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let timestamps: Vec<_> = (0..48).map(|h| start + chrono::TimeDelta::hours(h)).collect();
/// let values: Vec<f64> = (0..48).map(|h| (h % 24) as f64).collect();
/// let df = df! { "time" => timestamps, "load" => values }.unwrap();
///
/// let profiles = daily_profiles(&df, DEFAULT_CONFIDENCE, &SeasonClassifier::default()).unwrap();
/// assert_eq!(profiles.height(), 48);
/// ```
pub fn daily_profiles(
    df: &DataFrame,
    confidence: f64,
    classifier: &SeasonClassifier,
) -> Result<DataFrame, ProfileError> {
    if !(confidence > 50.0 && confidence <= 100.0) {
        return Err(ProfileError::InvalidConfidence(confidence));
    }
    if df.width() != 2 {
        return Err(ProfileError::ColumnCount(df.width()));
    }

    let columns = df.get_columns();
    let timestamps = timestamp_values(&columns[0])?;
    let values = columns[1].cast(&DataType::Float64)?;
    let (timestamps, values): (Vec<NaiveDateTime>, Vec<f64>) = timestamps
        .into_iter()
        .zip(values.f64()?.into_iter())
        .filter_map(|(timestamp, value)| Some((timestamp?, value?)))
        .unzip();
    let dropped = df.height() - timestamps.len();
    if dropped > 0 {
        warn!("Dropped {} rows with missing timestamp or value", dropped);
    }

    let readings = DataFrame::new(vec![
        Series::new("timestamp".into(), timestamps).into(),
        Series::new("value".into(), values).into(),
    ])?;
    let mut hourly = readings
        .lazy()
        .with_column(col("timestamp").dt().truncate(lit("1h")))
        .group_by([col("timestamp")])
        .agg([col("value").sum()])
        .sort(["timestamp"], SortMultipleOptions::default())
        .collect()?;

    let hours: Vec<NaiveDateTime> = hourly
        .column("timestamp")?
        .datetime()?
        .as_datetime_iter()
        .flatten()
        .collect();
    let seasons = classifier.seasons(&hours)?;
    let season_index: Vec<u32> = seasons.iter().map(|season| season.index() as u32).collect();
    let season_label: Vec<&str> = seasons
        .iter()
        .map(|season| classifier.labels().label(*season))
        .collect();
    hourly.with_column(Series::new("season_index".into(), season_index))?;
    hourly.with_column(Series::new("season".into(), season_label))?;

    let hour_count = hourly.height();
    let upper = confidence / 100.0;
    let lower = (100.0 - confidence) / 100.0;
    let profiles = hourly
        .lazy()
        .with_columns([
            col("timestamp").dt().strftime("%A").alias("weekday"),
            col("timestamp").dt().weekday().alias("weekday_index"),
            col("timestamp").dt().hour().cast(DataType::Int32).alias("dayhour"),
        ])
        .group_by([
            col("season_index"),
            col("season"),
            col("weekday_index"),
            col("weekday"),
            col("dayhour"),
        ])
        .agg([
            col("value")
                .quantile(lit(0.5), QuantileMethod::Linear)
                .alias("value_median"),
            col("value")
                .quantile(lit(upper), QuantileMethod::Linear)
                .alias("value_upper"),
            col("value")
                .quantile(lit(lower), QuantileMethod::Linear)
                .alias("value_lower"),
        ])
        .sort(
            ["season_index", "weekday_index", "dayhour"],
            SortMultipleOptions::default(),
        )
        .select([
            col("season"),
            col("weekday"),
            col("dayhour"),
            col("value_median"),
            col("value_upper"),
            col("value_lower"),
        ])
        .collect()?;

    info!(
        "Built {} profile rows from {} hourly sums",
        profiles.height(),
        hour_count
    );
    Ok(profiles)
}

fn timestamp_values(column: &Column) -> Result<Vec<Option<NaiveDateTime>>, ProfileError> {
    match column.dtype() {
        DataType::Datetime(_, _) => Ok(column.datetime()?.as_datetime_iter().collect()),
        DataType::Date => {
            let as_datetime = column.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
            let values = as_datetime.datetime()?.as_datetime_iter().collect();
            Ok(values)
        }
        DataType::String => column
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                None => Ok(None),
                Some(text) => text
                    .to_timestamp()
                    .map(Some)
                    .ok_or_else(|| ProfileError::InvalidTimestamp {
                        row,
                        value: text.to_string(),
                    }),
            })
            .collect(),
        other => Err(ProfileError::UnsupportedTimestampType(other.clone())),
    }
}
