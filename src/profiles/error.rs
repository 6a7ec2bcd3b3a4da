use crate::season::error::SeasonError;
use polars::error::PolarsError;
use polars::prelude::DataType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Confidence level {0} is outside (50, 100]")]
    InvalidConfidence(f64),

    #[error("Expected a frame with two columns (timestamp, value), found {0}")]
    ColumnCount(usize),

    #[error("Timestamp column has unsupported type {0}")]
    UnsupportedTimestampType(DataType),

    #[error("Could not parse timestamp '{value}' in row {row}")]
    InvalidTimestamp { row: usize, value: String },

    #[error(transparent)]
    Season(#[from] SeasonError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
