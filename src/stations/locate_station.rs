//! Nearest-station search over the MeteoSwiss automatic network.

use crate::geo::bounds::SWITZERLAND;
use crate::geo::distance::distance_km;
use crate::stations::error::MeteoSwissError;
use crate::types::geo_point::GeoPoint;
use crate::types::sensor::SensorKind;
use crate::types::station::StationRecord;
use log::{debug, info};
use ordered_float::OrderedFloat;

/// Maximum altitude difference in meters between target and station (exclusive).
pub const ALTITUDE_TOLERANCE_M: f64 = 150.0;

/// Something that can produce the current station table.
pub trait StationSource {
    fn stations(&self) -> Result<Vec<StationRecord>, MeteoSwissError>;
}

impl StationSource for [StationRecord] {
    fn stations(&self) -> Result<Vec<StationRecord>, MeteoSwissError> {
        Ok(self.to_vec())
    }
}

impl StationSource for Vec<StationRecord> {
    fn stations(&self) -> Result<Vec<StationRecord>, MeteoSwissError> {
        Ok(self.clone())
    }
}

/// Returns the closest station that reports `sensor` and whose altitude is within
/// ±150 m of `altitude_m`.
///
/// Stations without measurements are ignored. Equal distances keep their order in
/// `stations`.
pub fn nearest_station<'a>(
    stations: &'a [StationRecord],
    target: GeoPoint,
    altitude_m: f64,
    sensor: SensorKind,
) -> Option<&'a StationRecord> {
    let mut candidates: Vec<(OrderedFloat<f64>, &StationRecord)> = stations
        .iter()
        .filter(|station| station.has_measurements)
        .map(|station| (OrderedFloat(distance_km(target, station.location)), station))
        .collect();
    candidates.sort_by_key(|(distance, _)| *distance);

    candidates
        .into_iter()
        .find(|(_, station)| {
            altitude_m > station.altitude_m - ALTITUDE_TOLERANCE_M
                && altitude_m < station.altitude_m + ALTITUDE_TOLERANCE_M
                && station.supports(sensor)
        })
        .map(|(distance, station)| {
            debug!("{} is {:.2} km from {}", station.id, distance.0, target);
            station
        })
}

/// Finds the identifier of the closest qualifying station for `sensor`.
///
/// # Arguments
///
/// * `source` - Supplies the station table; fetched once per call.
/// * `target` - WGS84 location to match.
/// * `altitude_m` - Altitude of the target in meters above sea level.
/// * `sensor` - The measurement the station must provide.
///
/// # Returns
///
/// `Ok(Some(id))` for the closest qualifying station, `Ok(None)` if none qualifies.
///
/// # Errors
///
/// Returns [`MeteoSwissError::OutOfRange`] before touching `source` when the target lies
/// outside latitude 45.67..=47.92 / longitude 5.7..=10.7. Errors of the source are passed on.
///
/// # Examples
///
/// ```
/// use edautils::{find_nearest_station, GeoPoint, SensorKind, SensorSet, StationRecord};
///
/// let stations = vec![StationRecord {
///     id: "LUZ".to_string(),
///     name: "Luzern".to_string(),
///     location: GeoPoint::new(47.036436, 8.301022),
///     altitude_m: 454.0,
///     sensors: SensorSet::TEMPERATURE,
///     has_measurements: true,
/// }];
/// let horw = GeoPoint::new(47.0169, 8.3094);
/// let id = find_nearest_station(&stations, horw, 441.0, SensorKind::Temperature).unwrap();
/// assert_eq!(id.as_deref(), Some("LUZ"));
/// ```
pub fn find_nearest_station<S: StationSource + ?Sized>(
    source: &S,
    target: GeoPoint,
    altitude_m: f64,
    sensor: SensorKind,
) -> Result<Option<String>, MeteoSwissError> {
    if !SWITZERLAND.contains(target) {
        return Err(MeteoSwissError::OutOfRange {
            latitude: target.latitude,
            longitude: target.longitude,
        });
    }

    let stations = source.stations()?;
    let found = nearest_station(&stations, target, altitude_m, sensor);
    match found {
        Some(station) => info!("Closest station for {}: {}", sensor, station.name),
        None => info!(
            "No station for {} within {} m of {} m altitude",
            sensor, ALTITUDE_TOLERANCE_M, altitude_m
        ),
    }
    Ok(found.map(|station| station.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::station_table::parse_station_table;
    use crate::stations::station_table::tests::FEED;
    use crate::types::sensor::SensorSet;
    use std::cell::Cell;

    const HORW: GeoPoint = GeoPoint {
        latitude: 47.0169,
        longitude: 8.3094,
    };
    const SCHANGNAU: GeoPoint = GeoPoint {
        latitude: 46.8268,
        longitude: 7.8587,
    };

    fn feed() -> Vec<StationRecord> {
        parse_station_table(FEED.as_bytes().to_vec(), "test").unwrap()
    }

    fn station(id: &str, lat: f64, lon: f64, altitude_m: f64, sensors: SensorSet) -> StationRecord {
        StationRecord {
            id: id.to_string(),
            name: id.to_string(),
            location: GeoPoint::new(lat, lon),
            altitude_m,
            sensors,
            has_measurements: !sensors.is_empty(),
        }
    }

    struct CountingSource {
        stations: Vec<StationRecord>,
        calls: Cell<usize>,
    }

    impl StationSource for CountingSource {
        fn stations(&self) -> Result<Vec<StationRecord>, MeteoSwissError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.stations.clone())
        }
    }

    #[test]
    fn test_regression_fixtures() {
        let stations = feed();
        let find = |target, altitude, sensor| {
            find_nearest_station(&stations, target, altitude, sensor).unwrap()
        };
        assert_eq!(find(HORW, 441.0, SensorKind::Temperature).as_deref(), Some("LUZ"));
        assert_eq!(find(SCHANGNAU, 933.0, SensorKind::Temperature).as_deref(), Some("FLU"));
        assert_eq!(find(SCHANGNAU, 933.0, SensorKind::RelativeHumidity).as_deref(), Some("FLU"));
        assert_eq!(find(SCHANGNAU, 933.0, SensorKind::Rain).as_deref(), Some("FLU"));
    }

    #[test]
    fn test_scan_passes_nearer_stations_that_do_not_qualify() {
        let stations = feed();
        let distance_to = |id: &str| {
            let station = stations.iter().find(|s| s.id == id).unwrap();
            distance_km(SCHANGNAU, station.location)
        };
        // FLU lacks global radiation and NAP is 471 m higher; both are nearer than BAN.
        assert!(distance_to("FLU") < distance_to("BAN"));
        assert!(distance_to("NAP") < distance_to("BAN"));
        assert_eq!(
            find_nearest_station(&stations, SCHANGNAU, 933.0, SensorKind::GlobalRadiation)
                .unwrap()
                .as_deref(),
            Some("BAN")
        );
    }

    #[test]
    fn test_none_when_altitude_or_sensor_do_not_match() {
        let stations = feed();
        // Every rain station sits far below 1800 m.
        assert_eq!(
            find_nearest_station(&stations, HORW, 1800.0, SensorKind::Rain).unwrap(),
            None
        );
        // NAP and PIL report global radiation but are both more than 150 m off.
        assert_eq!(
            find_nearest_station(&stations, SCHANGNAU, 1700.0, SensorKind::GlobalRadiation)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_altitude_window_is_exclusive() {
        let stations = vec![station("A", 47.0, 8.3, 500.0, SensorSet::TEMPERATURE)];
        let at = |altitude| nearest_station(&stations, HORW, altitude, SensorKind::Temperature);
        assert!(at(350.0).is_none());
        assert!(at(650.0).is_none());
        assert!(at(350.1).is_some());
        assert!(at(649.9).is_some());
    }

    #[test]
    fn test_stations_without_measurements_are_skipped() {
        let mut silent = station("SILENT", 47.0169, 8.3094, 441.0, SensorSet::TEMPERATURE);
        silent.has_measurements = false;
        let stations = vec![silent, station("B", 47.1, 8.3, 441.0, SensorSet::TEMPERATURE)];
        let found = nearest_station(&stations, HORW, 441.0, SensorKind::Temperature).unwrap();
        assert_eq!(found.id, "B");
    }

    #[test]
    fn test_ties_keep_feed_order() {
        let stations = vec![
            station("FIRST", 47.1, 8.3, 441.0, SensorSet::TEMPERATURE),
            station("SECOND", 47.1, 8.3, 441.0, SensorSet::TEMPERATURE),
        ];
        let found = nearest_station(&stations, HORW, 441.0, SensorKind::Temperature).unwrap();
        assert_eq!(found.id, "FIRST");
    }

    #[test]
    fn test_out_of_range_rejected_without_fetch() {
        let source = CountingSource {
            stations: feed(),
            calls: Cell::new(0),
        };
        for target in [GeoPoint::new(52.52, 13.40), GeoPoint::new(47.0, 11.0), GeoPoint::new(45.0, 8.0)] {
            assert!(matches!(
                find_nearest_station(&source, target, 400.0, SensorKind::Temperature),
                Err(MeteoSwissError::OutOfRange { .. })
            ));
        }
        assert_eq!(source.calls.get(), 0);

        find_nearest_station(&source, HORW, 441.0, SensorKind::Temperature).unwrap();
        assert_eq!(source.calls.get(), 1);
    }
}
