use crate::data_io::error::DataIoError;
use crate::data_io::format::FileFormat;
use crate::data_io::{log_finished, write_atomically};
use bincode::config::Configuration;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

const BINCODE_CONFIG: Configuration = bincode::config::standard();

/// Saves a serializable value as `.json`, `.pkl` (binary) or `.pklz` (gzip binary).
///
/// Binary formats need concrete types; self-describing values such as
/// `serde_json::Value` only round-trip through `.json`.
///
/// # Errors
///
/// Returns [`DataIoError::UnsupportedFormat`] or [`DataIoError::WrongKind`] (for
/// `.csv`) before anything is written.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("meta/config.json");
/// let data = BTreeMap::from([("key1", "value1"), ("key2", "value2")]);
/// edautils::save_data(&data, &path).unwrap();
/// let loaded: BTreeMap<String, String> = edautils::load_data(&path).unwrap();
/// assert_eq!(loaded["key2"], "value2");
/// ```
pub fn save_data<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> Result<(), DataIoError> {
    let path = path.as_ref();
    let format = object_format(path)?;
    info!("Saving data to {}", path.display());
    let started = Instant::now();

    write_atomically(path, |file| {
        let mut writer = BufWriter::new(file);
        match format {
            ObjectFormat::Json => serde_json::to_writer(&mut writer, data)
                .map_err(|e| DataIoError::Json(path.to_path_buf(), e))?,
            ObjectFormat::Pickle => {
                bincode::serde::encode_into_std_write(data, &mut writer, BINCODE_CONFIG)
                    .map_err(|e| DataIoError::Encode(path.to_path_buf(), Box::new(e)))?;
            }
            ObjectFormat::CompressedPickle => {
                let mut encoder = GzEncoder::new(&mut writer, Compression::default());
                bincode::serde::encode_into_std_write(data, &mut encoder, BINCODE_CONFIG)
                    .map_err(|e| DataIoError::Encode(path.to_path_buf(), Box::new(e)))?;
                encoder
                    .finish()
                    .map_err(|e| DataIoError::Io(path.to_path_buf(), e))?;
            }
        }
        writer
            .flush()
            .map_err(|e| DataIoError::Io(path.to_path_buf(), e))
    })?;

    log_finished("Saved", path, started);
    Ok(())
}

/// Loads a value written by [`save_data`].
pub fn load_data<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataIoError> {
    let path = path.as_ref();
    let format = object_format(path)?;
    info!("Loading data from {}", path.display());
    let started = Instant::now();

    let file = File::open(path).map_err(|e| DataIoError::Io(path.to_path_buf(), e))?;
    let mut reader = BufReader::new(file);
    let data = match format {
        ObjectFormat::Json => serde_json::from_reader(reader)
            .map_err(|e| DataIoError::Json(path.to_path_buf(), e))?,
        ObjectFormat::Pickle => bincode::serde::decode_from_std_read(&mut reader, BINCODE_CONFIG)
            .map_err(|e| DataIoError::Decode(path.to_path_buf(), Box::new(e)))?,
        ObjectFormat::CompressedPickle => {
            let mut decoder = GzDecoder::new(reader);
            bincode::serde::decode_from_std_read(&mut decoder, BINCODE_CONFIG)
                .map_err(|e| DataIoError::Decode(path.to_path_buf(), Box::new(e)))?
        }
    };

    log_finished("Loaded", path, started);
    Ok(data)
}

enum ObjectFormat {
    Json,
    Pickle,
    CompressedPickle,
}

fn object_format(path: &Path) -> Result<ObjectFormat, DataIoError> {
    match FileFormat::from_path(path)? {
        FileFormat::Json => Ok(ObjectFormat::Json),
        FileFormat::Pickle => Ok(ObjectFormat::Pickle),
        FileFormat::CompressedPickle => Ok(ObjectFormat::CompressedPickle),
        FileFormat::Csv => Err(DataIoError::WrongKind {
            path: path.to_path_buf(),
            format: FileFormat::Csv,
            kind: "serialized objects",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Reading {
        day: NaiveDate,
        station: String,
        values: Vec<f64>,
    }

    fn sample() -> Vec<Reading> {
        (1..=10)
            .map(|d| Reading {
                day: NaiveDate::from_ymd_opt(2022, 1, d).unwrap(),
                station: "LUZ".to_string(),
                values: vec![d as f64 * 0.5, -1.25],
            })
            .collect()
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.json");
        let data = HashMap::from([
            ("key1".to_string(), "value1".to_string()),
            ("key2".to_string(), "value2".to_string()),
        ]);
        save_data(&data, &path).unwrap();
        let loaded: HashMap<String, String> = load_data(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_pickle_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["test.pkl", "nested/dir/test.pklz"] {
            let path = dir.path().join(name);
            save_data(&sample(), &path).unwrap();
            let loaded: Vec<Reading> = load_data(&path).unwrap();
            assert_eq!(loaded, sample(), "{}", name);
        }
    }

    #[test]
    fn test_pickle_uses_varint_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.pkl");
        save_data(&5u64, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), [5]);
        let loaded: u64 = load_data(&path).unwrap();
        assert_eq!(loaded, 5);
    }

    #[test]
    fn test_compressed_file_is_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.pklz");
        save_data(&sample(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_rejected_formats_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let unsupported = dir.path().join("new/test.txt");
        assert!(matches!(
            save_data(&sample(), &unsupported),
            Err(DataIoError::UnsupportedFormat(_))
        ));
        let csv = dir.path().join("new/test.csv");
        assert!(matches!(
            save_data(&sample(), &csv),
            Err(DataIoError::WrongKind { .. })
        ));
        assert!(!dir.path().join("new").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Vec<Reading>, _> = load_data(dir.path().join("missing.pkl"));
        assert!(matches!(result, Err(DataIoError::Io(..))));
    }
}
