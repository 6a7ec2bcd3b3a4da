//! Swiss postal code table in the GeoNames tab-separated layout:
//! `country, postal code, place, admin1 name, admin1 code, admin2 name, admin2 code,
//! admin3 name, admin3 code, latitude, longitude, accuracy`.

use crate::types::geo_point::GeoPoint;
use log::debug;
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;

// Zero-based positions; the reader names header-less columns `column_1`, `column_2`, ...
const POSTAL_CODE_COLUMN: usize = 1;
const LATITUDE_COLUMN: usize = 9;
const LONGITUDE_COLUMN: usize = 10;

/// Postal code to coordinate lookup. Places sharing a code are averaged.
#[derive(Debug, Clone, Default)]
pub struct PostalCodeTable {
    coordinates: HashMap<u32, GeoPoint>,
}

impl PostalCodeTable {
    /// Parses the table. Rows without a numeric postal code or coordinates
    /// (such as a header line) are skipped.
    pub fn parse(text: &str) -> PolarsResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let df = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|options| {
                options
                    .with_separator(b'\t')
                    .with_truncate_ragged_lines(true)
            })
            .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
            .finish()?;
        if df.width() <= LONGITUDE_COLUMN {
            debug!("Postal code table has only {} columns", df.width());
            return Ok(Self::default());
        }
        let rows = df.height();

        let averaged = df
            .lazy()
            .select([
                col(column_name(POSTAL_CODE_COLUMN))
                    .cast(DataType::UInt32)
                    .alias("postal_code"),
                col(column_name(LATITUDE_COLUMN))
                    .cast(DataType::Float64)
                    .alias("latitude"),
                col(column_name(LONGITUDE_COLUMN))
                    .cast(DataType::Float64)
                    .alias("longitude"),
            ])
            .filter(
                col("postal_code")
                    .is_not_null()
                    .and(col("latitude").is_not_null())
                    .and(col("longitude").is_not_null()),
            )
            .group_by([col("postal_code")])
            .agg([col("latitude").mean(), col("longitude").mean()])
            .collect()?;

        let codes = averaged.column("postal_code")?.u32()?;
        let latitudes = averaged.column("latitude")?.f64()?;
        let longitudes = averaged.column("longitude")?.f64()?;
        let coordinates: HashMap<u32, GeoPoint> = codes
            .into_iter()
            .zip(latitudes)
            .zip(longitudes)
            .filter_map(|((code, lat), lon)| Some((code?, GeoPoint::new(lat?, lon?))))
            .collect();
        debug!("Parsed {} postal codes from {} rows", coordinates.len(), rows);
        Ok(Self { coordinates })
    }

    pub fn get(&self, postal_code: u32) -> Option<GeoPoint> {
        self.coordinates.get(&postal_code).copied()
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

fn column_name(index: usize) -> String {
    format!("column_{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "country_code\tpostal_code\tplace_name\tstate_name\tstate_code\tcounty_name\tcounty_code\tcommunity_name\tcommunity_code\tlatitude\tlongitude\taccuracy
CH\t6048\tHorw\tKanton Luzern\tLU\tLuzern\t1061\tHorw\t1056\t47.0169\t8.3094\t
CH\t4600\tOlten\tKanton Solothurn\tSO\tOlten\t1108\tOlten\t2581\t47.3499\t7.9033\t
CH\t6197\tSchangnau\tKanton Bern\tBE\tEmmental\t250\tSchangnau\t908\t46.8268\t7.8587\t
CH\t6197\tKemmeriboden\tKanton Bern\tBE\tEmmental\t250\tSchangnau\t908\t46.8000\t7.9000\t
";

    #[test]
    fn test_lookup() {
        let table = PostalCodeTable::parse(TABLE).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(6048), Some(GeoPoint::new(47.0169, 8.3094)));
        assert_eq!(table.get(424242), None);
    }

    #[test]
    fn test_shared_code_is_averaged() {
        let table = PostalCodeTable::parse(TABLE).unwrap();
        let point = table.get(6197).unwrap();
        assert!((point.latitude - 46.8134).abs() < 1e-9);
        assert!((point.longitude - 7.87935).abs() < 1e-9);
    }

    #[test]
    fn test_garbage_is_skipped() {
        assert!(PostalCodeTable::parse("").unwrap().is_empty());
        assert!(PostalCodeTable::parse("not\ta\ttable\n").unwrap().is_empty());

        let headerless = "CH\t6048\tHorw\t\t\t\t\t\t\t47.0169\t8.3094\t
CH\t6048\tHorw\t\t\t\t\t\t\tunknown\t8.3094\t
CH\tnone\tNowhere\t\t\t\t\t\t\t46.0\t7.0\t
";
        let table = PostalCodeTable::parse(headerless).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(6048), Some(GeoPoint::new(47.0169, 8.3094)));
    }
}
