use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Coordinates ({latitude}, {longitude}) are out of range for {service}")]
    OutOfRange {
        latitude: f64,
        longitude: f64,
        service: &'static str,
    },

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read postal code table from {url}")]
    TableRead {
        url: String,
        #[source]
        source: polars::prelude::PolarsError,
    },

    #[error("Unexpected response from {url}: {message}")]
    UnexpectedResponse { url: String, message: String },

    #[error("Failed to geocode address '{address}' after {attempts} attempts")]
    AddressNotFound { address: String, attempts: usize },

    #[error("Failed to get lat/long for postal code {0}")]
    PostalCodeNotFound(u32),
}
