use crate::types::sensor::UnknownSensor;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeteoSwissError {
    #[error("Coordinates ({latitude}, {longitude}) are not in range for the Swiss station network")]
    OutOfRange { latitude: f64, longitude: f64 },

    #[error(transparent)]
    UnknownSensor(#[from] UnknownSensor),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse station feed from {url}")]
    CsvRead {
        url: String,
        #[source]
        source: PolarsError,
    },

    #[error("Station feed is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Failed Polars column operation on '{column}'")]
    ColumnOperation {
        column: String,
        #[source]
        source: PolarsError,
    },
}
