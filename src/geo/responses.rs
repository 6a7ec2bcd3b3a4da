//! Response bodies of the geocoding and elevation services and their conversion
//! into domain values.

use crate::geo::error::GeocodingError;
use crate::types::geo_point::{GeoPoint, Lv95Coordinate};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Some services send numbers as JSON strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn value(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReframeResponse {
    #[serde(default)]
    coordinates: Vec<NumberOrString>,
}

#[derive(Debug, Deserialize)]
struct HeightResponse {
    height: Option<NumberOrString>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ElevationResponse {
    #[serde(default)]
    results: Vec<ElevationResult>,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: NumberOrString,
    lon: NumberOrString,
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, GeocodingError> {
    serde_json::from_str(body).map_err(|source| GeocodingError::JsonParse {
        url: url.to_string(),
        source,
    })
}

fn unexpected(url: &str, message: impl Into<String>) -> GeocodingError {
    GeocodingError::UnexpectedResponse {
        url: url.to_string(),
        message: message.into(),
    }
}

/// Reads `{"coordinates": [easting, northing]}`.
pub(crate) fn parse_reframe(url: &str, body: &str) -> Result<Lv95Coordinate, GeocodingError> {
    let response: ReframeResponse = decode(url, body)?;
    match response.coordinates.as_slice() {
        [easting, northing, ..] => match (easting.value(), northing.value()) {
            (Some(e), Some(n)) => Ok(Lv95Coordinate::new(e, n)),
            _ => Err(unexpected(url, "coordinates are not numeric")),
        },
        _ => Err(unexpected(url, "missing coordinates")),
    }
}

/// Reads `{"height": "441.3"}`; a missing height counts as 0.
pub(crate) fn parse_height(url: &str, body: &str) -> Result<f64, GeocodingError> {
    let response: HeightResponse = decode(url, body)?;
    match response.height {
        None => Ok(0.0),
        Some(height) => height
            .value()
            .ok_or_else(|| unexpected(url, "height is not numeric")),
    }
}

/// Reads the first result's elevation, rounded to 0.1 m. A null elevation counts as 0.
pub(crate) fn parse_elevation(url: &str, body: &str) -> Result<f64, GeocodingError> {
    let response: ElevationResponse = decode(url, body)?;
    let first = response
        .results
        .first()
        .ok_or_else(|| unexpected(url, "no elevation results"))?;
    let elevation = first.elevation.unwrap_or(0.0);
    Ok((elevation * 10.0).round() / 10.0)
}

/// Reads the first place of a Nominatim search, `None` if the result list is empty.
pub(crate) fn parse_nominatim(url: &str, body: &str) -> Result<Option<GeoPoint>, GeocodingError> {
    let places: Vec<NominatimPlace> = decode(url, body)?;
    let Some(place) = places.first() else {
        return Ok(None);
    };
    match (place.lat.value(), place.lon.value()) {
        (Some(lat), Some(lon)) => Ok(Some(GeoPoint::new(lat, lon))),
        _ => Err(unexpected(url, "place coordinates are not numeric")),
    }
}
