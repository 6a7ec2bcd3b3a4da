use crate::stations::error::MeteoSwissError;
use crate::stations::locate_station::{find_nearest_station, StationSource};
use crate::stations::station_table::parse_station_table;
use crate::types::geo_point::GeoPoint;
use crate::types::sensor::SensorKind;
use crate::types::station::StationRecord;
use bon::bon;
use log::{info, warn};
use reqwest::blocking::Client;
use std::time::Instant;

const STATION_FEED_URL: &str = "https://data.geo.admin.ch/ch.meteoschweiz.messnetz-automatisch/ch.meteoschweiz.messnetz-automatisch_de.csv";

/// Downloads the MeteoSwiss automatic network station feed.
///
/// Nothing is cached; every call fetches the full table again.
#[derive(Debug, Clone)]
pub struct MeteoSwissClient {
    client: Client,
    feed_url: String,
}

#[bon]
impl MeteoSwissClient {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.feed_url(String)`: Optional. Location of the station CSV. Defaults to the geo.admin.ch feed.
    /// * `.client(Client)`: Optional. A preconfigured blocking `reqwest` client.
    #[builder]
    pub fn new(#[builder(into)] feed_url: Option<String>, client: Option<Client>) -> Self {
        Self {
            client: client.unwrap_or_default(),
            feed_url: feed_url.unwrap_or_else(|| STATION_FEED_URL.to_string()),
        }
    }

    /// Fetches all stations of the feed, including those without measurements.
    pub fn all_stations(&self) -> Result<Vec<StationRecord>, MeteoSwissError> {
        let url = &self.feed_url;
        info!("Downloading station feed from {}", url);
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| MeteoSwissError::NetworkRequest(url.clone(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    MeteoSwissError::HttpStatus {
                        url: url.clone(),
                        status,
                        source: e,
                    }
                } else {
                    MeteoSwissError::NetworkRequest(url.clone(), e)
                });
            }
        };
        let bytes = response
            .bytes()
            .map_err(|e| MeteoSwissError::NetworkRequest(url.clone(), e))?;

        let stations = parse_station_table(bytes.to_vec(), url)?;
        info!(
            "Parsed {} stations from {} in {:?}",
            stations.len(),
            url,
            started.elapsed()
        );
        Ok(stations)
    }

    /// Stations that currently report at least one measurement.
    pub fn current_station_data(&self) -> Result<Vec<StationRecord>, MeteoSwissError> {
        let mut stations = self.all_stations()?;
        stations.retain(|station| station.has_measurements);
        Ok(stations)
    }

    /// Finds the closest station for a sensor token (`temp`, `globrad`, `relhum` or `rain`).
    ///
    /// # Errors
    ///
    /// Returns [`MeteoSwissError::UnknownSensor`] for any other token and
    /// [`MeteoSwissError::OutOfRange`] for targets outside Switzerland, both before
    /// any download.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use edautils::{GeoPoint, MeteoSwissClient};
    ///
    /// let client = MeteoSwissClient::default();
    /// let station = client
    ///     .find_nearest_station(GeoPoint::new(47.0169, 8.3094), 441.0, "temp")
    ///     .unwrap();
    /// assert_eq!(station.as_deref(), Some("LUZ"));
    /// ```
    pub fn find_nearest_station(
        &self,
        target: GeoPoint,
        altitude_m: f64,
        sensor: &str,
    ) -> Result<Option<String>, MeteoSwissError> {
        let sensor: SensorKind = sensor.parse()?;
        find_nearest_station(self, target, altitude_m, sensor)
    }
}

impl Default for MeteoSwissClient {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl StationSource for MeteoSwissClient {
    fn stations(&self) -> Result<Vec<StationRecord>, MeteoSwissError> {
        self.current_station_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> MeteoSwissClient {
        MeteoSwissClient::builder()
            .feed_url("http://127.0.0.1:9/feed.csv")
            .build()
    }

    #[test]
    fn test_unknown_sensor_rejected_before_download() {
        let result = offline().find_nearest_station(GeoPoint::new(47.0169, 8.3094), 441.0, "wind");
        assert!(matches!(result, Err(MeteoSwissError::UnknownSensor(_))));
    }

    #[test]
    fn test_out_of_range_rejected_before_download() {
        let result = offline().find_nearest_station(GeoPoint::new(52.52, 13.40), 34.0, "temp");
        assert!(matches!(result, Err(MeteoSwissError::OutOfRange { .. })));
    }

    #[test]
    fn test_download_failure_is_reported() {
        let result = offline().current_station_data();
        assert!(matches!(result, Err(MeteoSwissError::NetworkRequest(..))));
    }

    #[test]
    #[ignore = "requires network access"]
    fn test_live_current_station_data() {
        let stations = MeteoSwissClient::default().current_station_data().unwrap();
        assert!(!stations.is_empty());
        assert!(stations.iter().all(|station| station.has_measurements));
    }

    #[test]
    #[ignore = "requires network access"]
    fn test_live_find_nearest_station() {
        let client = MeteoSwissClient::default();
        let station = client
            .find_nearest_station(GeoPoint::new(47.0169, 8.3094), 441.0, "temp")
            .unwrap();
        assert_eq!(station.as_deref(), Some("LUZ"));
    }
}
