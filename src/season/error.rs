use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeasonError {
    #[error("Invalid hemisphere '{0}', expected 'north' or 'south'")]
    InvalidHemisphere(String),

    #[error("Invalid season boundary mode '{0}', expected 'astronomical' or 'meteorological'")]
    InvalidMode(String),

    #[error("Could not interpret '{0}' as a timestamp")]
    InvalidTimestamp(String),

    #[error("Season boundaries for year {0} are out of the supported date range")]
    YearOutOfRange(i32),
}
