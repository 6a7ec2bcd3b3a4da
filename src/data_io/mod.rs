//! Extension-keyed persistence of serializable objects and data frames.

pub mod error;
pub mod format;
pub mod frames;
pub mod objects;

use crate::data_io::error::DataIoError;
use crate::utils::{ensure_parent_dir_exists, file_size_kib, parent_dir};
use log::info;
use std::fs::File;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Writes `path` through a temporary file in the same directory that is renamed
/// into place once `write` succeeded. Missing parent directories are created.
fn write_atomically<F>(path: &Path, write: F) -> Result<(), DataIoError>
where
    F: FnOnce(&mut File) -> Result<(), DataIoError>,
{
    if ensure_parent_dir_exists(path).map_err(|e| DataIoError::DirCreation(path.to_path_buf(), e))? {
        info!("Created directory {}", parent_dir(path).display());
    }
    let mut temp_file = NamedTempFile::new_in(parent_dir(path))
        .map_err(|e| DataIoError::Io(path.to_path_buf(), e))?;
    write(temp_file.as_file_mut())?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| DataIoError::Io(path.to_path_buf(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| DataIoError::Persist(path.to_path_buf(), e))?;
    Ok(())
}

fn log_finished(action: &str, path: &Path, started: Instant) {
    info!(
        "{} {} in {:.3?} ({} KiB)",
        action,
        path.display(),
        started.elapsed(),
        file_size_kib(path).unwrap_or_default()
    );
}
