//! Coordinate windows accepted by the Swiss services.

use crate::types::geo_point::GeoPoint;
use std::ops::RangeInclusive;

/// A latitude/longitude rectangle, bounds inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub latitude: RangeInclusive<f64>,
    pub longitude: RangeInclusive<f64>,
}

impl BoundingBox {
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.latitude.contains(&point.latitude) && self.longitude.contains(&point.longitude)
    }
}

/// Area covered by the MeteoSwiss network and the elevation lookup.
pub const SWITZERLAND: BoundingBox = BoundingBox {
    latitude: 45.67..=47.92,
    longitude: 5.7..=10.7,
};

/// Input range of the WGS84 to LV95 reframe service.
pub const LV95_REFRAME: BoundingBox = BoundingBox {
    latitude: 45.4..=48.2,
    longitude: 5.2..=11.0,
};
