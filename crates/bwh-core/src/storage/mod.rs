//! JSON artifact persistence
//!
//! Handles reading and atomically writing the per-profile JSON documents.
//! Every write goes to a temp file in the destination directory and is
//! published with a single rename, so readers never observe partial content.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{}': {message}", .path.display())]
    InvalidJson { path: PathBuf, message: String },

    #[error("Failed to serialize document for '{}': {message}", .path.display())]
    Serialize { path: PathBuf, message: String },
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and parse a JSON document.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_document(path: &Path) -> Result<Option<Value>, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            tracing::error!(
                event = "core.storage.read_failed",
                path = %path.display(),
                error = %e
            );
            return Err(io_error(path, e));
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| {
            tracing::warn!(
                event = "core.storage.invalid_json",
                path = %path.display(),
                error = %e
            );
            StorageError::InvalidJson {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })
}

fn temp_file_in(destination: &Path) -> Result<NamedTempFile, StorageError> {
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    NamedTempFile::new_in(parent).map_err(|e| io_error(parent, e))
}

/// Serialize `value` as pretty JSON and atomically replace `destination`.
///
/// The parent directory is created if needed. The temp file is removed on
/// any failure before the rename.
pub fn write_json_atomic<T: Serialize + ?Sized>(
    destination: &Path,
    value: &T,
) -> Result<(), StorageError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|e| StorageError::Serialize {
        path: destination.to_path_buf(),
        message: e.to_string(),
    })?;
    json.push('\n');

    let mut temp_file = temp_file_in(destination)?;
    temp_file
        .write_all(json.as_bytes())
        .and_then(|()| temp_file.as_file().sync_all())
        .map_err(|e| io_error(temp_file.path(), e))?;

    temp_file
        .persist(destination)
        .map_err(|e| io_error(destination, e.error))?;

    tracing::debug!(
        event = "core.storage.write_completed",
        path = %destination.display(),
        bytes = json.len()
    );

    Ok(())
}

/// Copy `source` verbatim over `destination` through a temp file + rename.
pub fn copy_atomic(source: &Path, destination: &Path) -> Result<(), StorageError> {
    let temp_file = temp_file_in(destination)?;

    fs::copy(source, temp_file.path()).map_err(|e| io_error(source, e))?;

    temp_file
        .persist(destination)
        .map_err(|e| io_error(destination, e.error))?;

    tracing::debug!(
        event = "core.storage.copy_completed",
        source = %source.display(),
        destination = %destination.display()
    );

    Ok(())
}
