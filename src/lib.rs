//! Utilities for energy data analysis: season classification, Swiss geocoding and
//! elevation lookups, MeteoSwiss station matching, data file helpers and daily
//! load profiles.

mod data_io;
mod error;
mod geo;
mod profiles;
mod season;
mod stations;
mod types;
mod utils;

pub use error::EdaError;

pub use types::any_timestamp::AnyTimestamp;
pub use types::geo_point::{GeoPoint, Lv95Coordinate};
pub use types::season::{Hemisphere, Season, SeasonBoundaryMode, SeasonLabels};
pub use types::sensor::{SensorKind, SensorSet, UnknownSensor};
pub use types::station::StationRecord;

pub use season::boundaries::SeasonBoundaries;
pub use season::classifier::SeasonClassifier;
pub use season::ephemeris::{solar_event, SolarEvent};
pub use season::error::SeasonError;

pub use geo::bounds::{BoundingBox, LV95_REFRAME, SWITZERLAND};
pub use geo::distance::{distance_km, EARTH_RADIUS_KM};
pub use geo::error::GeocodingError;
pub use geo::geocoder::Geocoder;
pub use geo::postal_codes::PostalCodeTable;

pub use stations::error::MeteoSwissError;
pub use stations::fetcher::MeteoSwissClient;
pub use stations::locate_station::{
    find_nearest_station, nearest_station, StationSource, ALTITUDE_TOLERANCE_M,
};
pub use stations::station_table::parse_station_table;

pub use data_io::error::DataIoError;
pub use data_io::format::FileFormat;
pub use data_io::frames::{load_frame, save_frame, sniff_delimiter};
pub use data_io::objects::{load_data, save_data};

pub use profiles::daily_profiles::{daily_profiles, DEFAULT_CONFIDENCE};
pub use profiles::error::ProfileError;
