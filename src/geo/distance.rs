use crate::types::geo_point::GeoPoint;

/// Earth radius in kilometers used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6373.0;

/// Great-circle distance between two points in kilometers (haversine formula).
///
/// Non-finite inputs yield NaN rather than an error.
///
/// # Examples
///
/// ```
/// use edautils::{distance_km, GeoPoint};
///
/// let horw = GeoPoint::new(47.0169, 8.3094);
/// let olten = GeoPoint::new(47.3499, 7.9033);
/// assert!((distance_km(horw, olten) - 48.1).abs() < 0.1);
/// ```
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
