use crate::data_io::format::FileFormat;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataIoError {
    #[error("Unsupported file format for '{0}', expected .csv, .pkl, .pklz or .json")]
    UnsupportedFormat(PathBuf),

    #[error("{format} files cannot hold {kind} ('{path}')")]
    WrongKind {
        path: PathBuf,
        format: FileFormat,
        kind: &'static str,
    },

    #[error("Failed to create directory for '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error on '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to persist temporary file to '{0}'")]
    Persist(PathBuf, #[source] tempfile::PersistError),

    #[error("JSON error on '{0}'")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode data for '{0}'")]
    Encode(PathBuf, #[source] Box<bincode::error::EncodeError>),

    #[error("Failed to decode data from '{0}'")]
    Decode(PathBuf, #[source] Box<bincode::error::DecodeError>),

    #[error("CSV error on '{0}'")]
    Csv(PathBuf, #[source] PolarsError),
}
