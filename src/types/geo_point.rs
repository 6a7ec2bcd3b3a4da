//! Coordinate types shared by the geocoding and station modules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 position in decimal degrees.
///
/// # Examples
///
/// ```
/// use edautils::GeoPoint;
///
/// let horw = GeoPoint::new(47.0169, 8.3094);
/// assert_eq!(horw.latitude, 47.0169);
/// assert_eq!(GeoPoint::from((47.0169, 8.3094)), horw);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees (positive for North).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East).
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A position in the Swiss LV95 reference frame, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lv95Coordinate {
    pub easting: f64,
    pub northing: f64,
}

impl Lv95Coordinate {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }
}

impl fmt::Display for Lv95Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E {} / N {}", self.easting, self.northing)
    }
}
