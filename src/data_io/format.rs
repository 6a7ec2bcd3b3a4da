use crate::data_io::error::DataIoError;
use std::fmt;
use std::path::Path;

/// File formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// `.csv`, tabular data.
    Csv,
    /// `.pkl`, binary-encoded object.
    Pickle,
    /// `.pklz`, gzip-compressed binary-encoded object.
    CompressedPickle,
    /// `.json`, JSON-encoded object.
    Json,
}

impl FileFormat {
    /// Picks the format from the extension of `path`, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use edautils::FileFormat;
    ///
    /// assert_eq!(FileFormat::from_path("out/load.pklz").unwrap(), FileFormat::CompressedPickle);
    /// assert!(FileFormat::from_path("out/load.parquet").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataIoError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("pkl") => Ok(FileFormat::Pickle),
            Some("pklz") => Ok(FileFormat::CompressedPickle),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(DataIoError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Pickle => "pkl",
            FileFormat::CompressedPickle => "pklz",
            FileFormat::Json => "json",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
