//! Parsing of the semicolon-delimited MeteoSwiss station feed.

use crate::stations::error::MeteoSwissError;
use crate::types::geo_point::GeoPoint;
use crate::types::sensor::SensorSet;
use crate::types::station::StationRecord;
use log::{debug, warn};
use polars::prelude::*;
use std::io::Cursor;

pub const COLUMN_ID: &str = "Abk.";
pub const COLUMN_NAME: &str = "Station";
pub const COLUMN_ALTITUDE: &str = "Stationshöhe m ü. M.";
pub const COLUMN_LATITUDE: &str = "Breitengrad";
pub const COLUMN_LONGITUDE: &str = "Längengrad";
pub const COLUMN_MEASUREMENTS: &str = "Messungen";

/// Decodes the feed as UTF-8, falling back to Latin-1.
pub fn decode_feed(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("Station feed is not UTF-8, decoding as Latin-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Parses the raw feed into station records, in feed order.
///
/// All columns are read as text. Rows whose altitude or coordinates are not
/// numeric (footnotes, blank lines) are skipped.
pub fn parse_station_table(bytes: Vec<u8>, url: &str) -> Result<Vec<StationRecord>, MeteoSwissError> {
    let text = decode_feed(bytes);
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| {
            options
                .with_separator(b';')
                .with_truncate_ragged_lines(true)
        })
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|source| MeteoSwissError::CsvRead {
            url: url.to_string(),
            source,
        })?;

    let ids = text_column(&df, COLUMN_ID)?;
    let names = text_column(&df, COLUMN_NAME)?;
    let altitudes = text_column(&df, COLUMN_ALTITUDE)?;
    let latitudes = text_column(&df, COLUMN_LATITUDE)?;
    let longitudes = text_column(&df, COLUMN_LONGITUDE)?;
    let measurements = text_column(&df, COLUMN_MEASUREMENTS)?;

    let mut stations = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for row in 0..df.height() {
        let number = |values: &StringChunked| {
            values
                .get(row)
                .and_then(|v| v.trim().parse::<f64>().ok())
        };
        let (Some(altitude_m), Some(latitude), Some(longitude)) =
            (number(altitudes), number(latitudes), number(longitudes))
        else {
            skipped += 1;
            continue;
        };
        let measurement_list = measurements.get(row).map(str::trim).unwrap_or_default();
        stations.push(StationRecord {
            id: ids.get(row).unwrap_or_default().trim().to_string(),
            name: names.get(row).unwrap_or_default().trim().to_string(),
            location: GeoPoint::new(latitude, longitude),
            altitude_m,
            sensors: SensorSet::from_measurements(measurement_list),
            has_measurements: !measurement_list.is_empty(),
        });
    }
    if skipped > 0 {
        warn!("Skipped {} station feed rows without numeric position", skipped);
    }
    Ok(stations)
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, MeteoSwissError> {
    let column = df
        .column(name)
        .map_err(|_| MeteoSwissError::MissingColumn(name.to_string()))?;
    column.str().map_err(|source| MeteoSwissError::ColumnOperation {
        column: name.to_string(),
        source,
    })
}
