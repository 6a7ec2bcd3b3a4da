//! Defines the record describing one MeteoSwiss automatic weather station as
//! read from the station feed.

use crate::types::geo_point::GeoPoint;
use crate::types::sensor::{SensorKind, SensorSet};

/// A single station of the MeteoSwiss automatic measurement network.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    /// The station abbreviation used as identifier (e.g. "LUZ").
    pub id: String,
    /// Human readable station name (e.g. "Luzern").
    pub name: String,
    /// Geographical location of the station.
    pub location: GeoPoint,
    /// Station altitude in meters above sea level.
    pub altitude_m: f64,
    /// Sensors the station reports.
    pub sensors: SensorSet,
    /// Whether the feed lists any measurement for this station.
    pub has_measurements: bool,
}

impl StationRecord {
    pub fn supports(&self, sensor: SensorKind) -> bool {
        self.sensors.supports(sensor)
    }
}
