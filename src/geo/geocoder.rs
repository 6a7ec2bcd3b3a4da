//! Blocking client for the Swiss geodesy, elevation, address and postal code
//! lookups.

use crate::geo::bounds::{BoundingBox, LV95_REFRAME, SWITZERLAND};
use crate::geo::error::GeocodingError;
use crate::geo::postal_codes::PostalCodeTable;
use crate::geo::responses::{parse_elevation, parse_height, parse_nominatim, parse_reframe};
use crate::types::geo_point::{GeoPoint, Lv95Coordinate};
use bon::bon;
use log::{debug, info, warn};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::USER_AGENT;
use std::thread;
use std::time::Duration;

const REFRAME_URL: &str = "http://geodesy.geo.admin.ch/reframe/wgs84tolv95";
const HEIGHT_URL: &str = "https://api3.geo.admin.ch/rest/services/height";
const ELEVATION_URL: &str = "https://api.opentopodata.org/v1/eudem25m";
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const POSTAL_TABLE_URL: &str = "https://symerio.github.io/postal-codes-data/data/geonames/CH.txt";
const DEFAULT_USER_AGENT: &str = concat!("edautils/", env!("CARGO_PKG_VERSION"));
const DEFAULT_ADDRESS_ATTEMPTS: usize = 3;
const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Client for coordinate conversion, altitude lookup and geocoding.
///
/// Every call blocks until the service answers. The defaults point at the public
/// services; tests and mirrors can override the base URLs through the builder.
///
/// # Examples
///
/// ```no_run
/// use edautils::{GeoPoint, Geocoder, GeocodingError};
///
/// # fn main() -> Result<(), GeocodingError> {
/// let geocoder = Geocoder::builder().user_agent("my-analysis/1.0").build();
/// let horw = geocoder.coordinates_ch_plz(6048)?;
/// let altitude = geocoder.altitude_lat_long(horw)?;
/// let lv95 = geocoder.wgs84_to_lv95(horw)?;
/// println!("{} at {} m ({})", horw, altitude, lv95);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    reframe_url: String,
    height_url: String,
    elevation_url: String,
    nominatim_url: String,
    postal_table_url: String,
    user_agent: String,
    address_attempts: usize,
    retry_delay: Duration,
    rate_limit_delay: Duration,
}

#[bon]
impl Geocoder {
    /// Creates a geocoder.
    ///
    /// # Arguments
    ///
    /// * `.user_agent(String)`: Optional. Sent with every request; Nominatim requires one.
    /// * `.address_attempts(usize)`: Optional. Tries for an address lookup. Defaults to `3`.
    /// * `.retry_delay(Duration)`: Optional. Pause between address attempts. Defaults to 1 s.
    /// * `.rate_limit_delay(Duration)`: Optional. Pause after each elevation lookup. Defaults to 1 s.
    /// * `.reframe_url`, `.height_url`, `.elevation_url`, `.nominatim_url`, `.postal_table_url`:
    ///   Optional service endpoints.
    #[builder]
    pub fn new(
        #[builder(into)] user_agent: Option<String>,
        address_attempts: Option<usize>,
        retry_delay: Option<Duration>,
        rate_limit_delay: Option<Duration>,
        #[builder(into)] reframe_url: Option<String>,
        #[builder(into)] height_url: Option<String>,
        #[builder(into)] elevation_url: Option<String>,
        #[builder(into)] nominatim_url: Option<String>,
        #[builder(into)] postal_table_url: Option<String>,
        client: Option<Client>,
    ) -> Self {
        Self {
            client: client.unwrap_or_default(),
            reframe_url: reframe_url.unwrap_or_else(|| REFRAME_URL.to_string()),
            height_url: height_url.unwrap_or_else(|| HEIGHT_URL.to_string()),
            elevation_url: elevation_url.unwrap_or_else(|| ELEVATION_URL.to_string()),
            nominatim_url: nominatim_url.unwrap_or_else(|| NOMINATIM_URL.to_string()),
            postal_table_url: postal_table_url.unwrap_or_else(|| POSTAL_TABLE_URL.to_string()),
            user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            address_attempts: address_attempts.unwrap_or(DEFAULT_ADDRESS_ATTEMPTS).max(1),
            retry_delay: retry_delay.unwrap_or(DEFAULT_DELAY),
            rate_limit_delay: rate_limit_delay.unwrap_or(DEFAULT_DELAY),
        }
    }

    /// Converts WGS84 coordinates to the Swiss LV95 frame.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::OutOfRange`] without a request unless
    /// `45.4 <= lat <= 48.2` and `5.2 <= lon <= 11`.
    pub fn wgs84_to_lv95(&self, point: GeoPoint) -> Result<Lv95Coordinate, GeocodingError> {
        check_range(point, &LV95_REFRAME, "LV95 conversion")?;
        let url = &self.reframe_url;
        let request = self.client.get(url).query(&[
            ("easting", point.longitude.to_string()),
            ("northing", point.latitude.to_string()),
        ]);
        let body = self.fetch_text(request, url)?;
        parse_reframe(url, &body)
    }

    /// Altitude in meters above sea level at an LV95 position.
    pub fn altitude_lv95(&self, coordinate: Lv95Coordinate) -> Result<f64, GeocodingError> {
        let url = &self.height_url;
        let request = self.client.get(url).query(&[
            ("easting", coordinate.easting.to_string()),
            ("northing", coordinate.northing.to_string()),
        ]);
        let body = self.fetch_text(request, url)?;
        parse_height(url, &body)
    }

    /// Altitude in meters above sea level at a WGS84 position, rounded to 0.1 m.
    ///
    /// Sleeps for the rate-limit delay after a successful lookup.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::OutOfRange`] for points outside Switzerland.
    pub fn altitude_lat_long(&self, point: GeoPoint) -> Result<f64, GeocodingError> {
        check_range(point, &SWITZERLAND, "the Swiss elevation model")?;
        let url = &self.elevation_url;
        let locations = format!("{},{}", point.latitude, point.longitude);
        let request = self.client.get(url).query(&[("locations", locations)]);
        let body = self.fetch_text(request, url)?;
        let altitude = parse_elevation(url, &body)?;
        thread::sleep(self.rate_limit_delay);
        Ok(altitude)
    }

    /// Geocodes a free-text address.
    ///
    /// Empty results are retried up to the configured number of attempts with a
    /// fixed delay in between.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::AddressNotFound`] once all attempts came back empty.
    /// Transport and parse failures are returned immediately.
    pub fn lat_long_address(&self, address: &str) -> Result<GeoPoint, GeocodingError> {
        let url = &self.nominatim_url;
        for attempt in 1..=self.address_attempts {
            let request = self
                .client
                .get(url)
                .query(&[("q", address), ("format", "json"), ("limit", "1")]);
            let body = self.fetch_text(request, url)?;
            if let Some(point) = parse_nominatim(url, &body)? {
                info!("Geocoded '{}' to {}", address, point);
                return Ok(point);
            }
            warn!(
                "No result for '{}' (attempt {}/{})",
                address, attempt, self.address_attempts
            );
            if attempt < self.address_attempts {
                thread::sleep(self.retry_delay);
            }
        }
        Err(GeocodingError::AddressNotFound {
            address: address.to_string(),
            attempts: self.address_attempts,
        })
    }

    /// Coordinates of a Swiss postal code, averaged over the places sharing it.
    pub fn coordinates_ch_plz(&self, postal_code: u32) -> Result<GeoPoint, GeocodingError> {
        let url = &self.postal_table_url;
        let body = self.fetch_text(self.client.get(url), url)?;
        let table = PostalCodeTable::parse(&body).map_err(|source| GeocodingError::TableRead {
            url: url.to_string(),
            source,
        })?;
        debug!("Loaded {} postal codes from {}", table.len(), url);
        table
            .get(postal_code)
            .ok_or(GeocodingError::PostalCodeNotFound(postal_code))
    }

    fn fetch_text(&self, request: RequestBuilder, url: &str) -> Result<String, GeocodingError> {
        let response = request
            .header(USER_AGENT, &self.user_agent)
            .send()
            .map_err(|e| GeocodingError::NetworkRequest(url.to_string(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(match e.status() {
                    Some(status) => GeocodingError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    },
                    None => GeocodingError::NetworkRequest(url.to_string(), e),
                });
            }
        };
        response
            .text()
            .map_err(|e| GeocodingError::NetworkRequest(url.to_string(), e))
    }
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn check_range(
    point: GeoPoint,
    bounds: &BoundingBox,
    service: &'static str,
) -> Result<(), GeocodingError> {
    if bounds.contains(point) {
        Ok(())
    } else {
        Err(GeocodingError::OutOfRange {
            latitude: point.latitude,
            longitude: point.longitude,
            service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Points at a closed port so a stray request fails fast instead of reaching a service.
    fn offline() -> Geocoder {
        let dead = "http://127.0.0.1:9";
        Geocoder::builder()
            .reframe_url(dead)
            .height_url(dead)
            .elevation_url(dead)
            .nominatim_url(dead)
            .postal_table_url(dead)
            .retry_delay(Duration::ZERO)
            .rate_limit_delay(Duration::ZERO)
            .build()
    }

    #[test]
    fn test_lv95_range_rejected_before_request() {
        let geocoder = offline();
        for point in [GeoPoint::new(57.0145, 8.3062), GeoPoint::new(47.0145, 15.3062)] {
            assert!(matches!(
                geocoder.wgs84_to_lv95(point),
                Err(GeocodingError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_elevation_range_rejected_before_request() {
        let geocoder = offline();
        for (lat, lon) in [(57.0145, 8.3062), (100.0, 10.0), (-100.0, 10.0), (10.0, -200.0), (10.0, 200.0)] {
            assert!(matches!(
                geocoder.altitude_lat_long(GeoPoint::new(lat, lon)),
                Err(GeocodingError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_unreachable_service_is_network_error() {
        let geocoder = offline();
        assert!(matches!(
            geocoder.altitude_lv95(Lv95Coordinate::new(2665949.0, 1207341.8)),
            Err(GeocodingError::NetworkRequest(..))
        ));
    }

    #[test]
    fn test_query_parameters_are_encoded() {
        let geocoder = Geocoder::default();
        let request = geocoder
            .client
            .get(&geocoder.elevation_url)
            .query(&[("locations", "47.0145,8.3062")])
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.opentopodata.org/v1/eudem25m?locations=47.0145%2C8.3062"
        );
    }

    #[test]
    fn test_builder_defaults() {
        let geocoder = Geocoder::default();
        assert_eq!(geocoder.address_attempts, 3);
        assert_eq!(geocoder.retry_delay, Duration::from_secs(1));
        assert_eq!(geocoder.reframe_url, REFRAME_URL);
        assert!(geocoder.user_agent.starts_with("edautils/"));

        let zero = Geocoder::builder().address_attempts(0).build();
        assert_eq!(zero.address_attempts, 1);
    }

    #[test]
    #[ignore = "requires network access"]
    fn test_live_lv95_and_height() {
        let geocoder = Geocoder::default();
        let lv95 = geocoder.wgs84_to_lv95(GeoPoint::new(47.01331, 8.30612)).unwrap();
        assert!((2665959.0..2665962.0).contains(&lv95.easting.round()));
        let height = geocoder.altitude_lv95(Lv95Coordinate::new(2665949.0, 1207341.8)).unwrap();
        assert!((438.0..445.0).contains(&height.round()));
    }

    #[test]
    #[ignore = "requires network access"]
    fn test_live_altitude_lat_long() {
        let altitude = Geocoder::default()
            .altitude_lat_long(GeoPoint::new(47.01450, 8.30620))
            .unwrap();
        assert!((438.0..445.0).contains(&altitude.round()));
    }

    #[test]
    #[ignore = "requires network access"]
    fn test_live_address() {
        let geocoder = Geocoder::default();
        let point = geocoder.lat_long_address("Technikumstrasse 21, 6048 Horw").unwrap();
        assert!((point.latitude - 47.0).abs() < 0.05);
        assert!((point.longitude - 8.3).abs() < 0.05);
        assert!(matches!(
            geocoder.lat_long_address("Highway to hell, Horw, Switzerland"),
            Err(GeocodingError::AddressNotFound { attempts: 3, .. })
        ));
    }

    #[test]
    #[ignore = "requires network access"]
    fn test_live_postal_code() {
        let geocoder = Geocoder::default();
        let horw = geocoder.coordinates_ch_plz(6048).unwrap();
        assert!((47.005..47.02).contains(&horw.latitude));
        assert!((8.29..8.31).contains(&horw.longitude));
        assert!(matches!(
            geocoder.coordinates_ch_plz(424242),
            Err(GeocodingError::PostalCodeNotFound(424242))
        ));
    }
}
