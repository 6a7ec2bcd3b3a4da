use crate::data_io::error::DataIoError;
use crate::geo::error::GeocodingError;
use crate::profiles::error::ProfileError;
use crate::season::error::SeasonError;
use crate::stations::error::MeteoSwissError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdaError {
    #[error(transparent)]
    Season(#[from] SeasonError),

    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    #[error(transparent)]
    MeteoSwiss(#[from] MeteoSwissError),

    #[error(transparent)]
    DataIo(#[from] DataIoError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}
