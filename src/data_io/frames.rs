use crate::data_io::error::DataIoError;
use crate::data_io::format::FileFormat;
use crate::data_io::{log_finished, write_atomically};
use log::{debug, info};
use polars::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Delimiters recognized when loading, in order of preference on ties.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Saves a data frame as comma-separated `.csv` with a header row.
///
/// # Errors
///
/// Returns [`DataIoError::UnsupportedFormat`] or [`DataIoError::WrongKind`] for any
/// other extension before anything is written.
pub fn save_frame(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<(), DataIoError> {
    let path = path.as_ref();
    frame_format(path)?;
    info!("Saving {}x{} frame to {}", df.height(), df.width(), path.display());
    let started = Instant::now();

    write_atomically(path, |file| {
        CsvWriter::new(file)
            .include_header(true)
            .with_separator(b',')
            .finish(df)
            .map_err(|e| DataIoError::Csv(path.to_path_buf(), e))
    })?;

    log_finished("Saved", path, started);
    Ok(())
}

/// Loads a `.csv` file, detecting the delimiter (`,`, `;`, tab or `|`) from the header.
///
/// Date and datetime columns are parsed where polars recognizes them.
pub fn load_frame(path: impl AsRef<Path>) -> Result<DataFrame, DataIoError> {
    let path = path.as_ref();
    frame_format(path)?;
    info!("Loading frame from {}", path.display());
    let started = Instant::now();

    let contents = fs::read(path).map_err(|e| DataIoError::Io(path.to_path_buf(), e))?;
    let separator = sniff_delimiter(&contents);
    debug!("Using delimiter {:?} for {}", separator as char, path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|options| {
            options
                .with_separator(separator)
                .with_try_parse_dates(true)
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DataIoError::Csv(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| DataIoError::Csv(path.to_path_buf(), e))?;

    log_finished("Loaded", path, started);
    Ok(df)
}

/// Picks the candidate delimiter occurring most often in the first line, ignoring
/// quoted sections. Falls back to a comma.
pub fn sniff_delimiter(contents: &[u8]) -> u8 {
    let header = contents
        .split(|&b| b == b'\n')
        .next()
        .unwrap_or_default();

    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for &byte in header {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if !in_quotes {
            if let Some(i) = CANDIDATE_DELIMITERS.iter().position(|&d| d == byte) {
                counts[i] += 1;
            }
        }
    }

    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        // max_by_key returns the last maximum; reverse so earlier candidates win ties.
        .rev()
        .max_by_key(|(_, count)| **count)
        .map(|(i, _)| CANDIDATE_DELIMITERS[i])
        .unwrap_or(b',')
}

fn frame_format(path: &Path) -> Result<(), DataIoError> {
    match FileFormat::from_path(path)? {
        FileFormat::Csv => Ok(()),
        format => Err(DataIoError::WrongKind {
            path: path.to_path_buf(),
            format,
            kind: "data frames",
        }),
    }
}
