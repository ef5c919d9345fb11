//! File I/O utilities with atomic writes
//!
//! Reads are lenient: a missing or unparseable file yields the default value,
//! so a corrupt snapshot degrades to "no prior data" instead of failing the
//! session. Writes go through a temp file and an atomic rename.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::WalletbookError;

/// Read JSON from a file, falling back to the default value when the file is
/// missing, unreadable, or corrupt. Parse failures are logged, never raised.
pub fn read_json_or_default<T, P>(path: P) -> T
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return T::default();
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to open data file, starting empty");
            return T::default();
        }
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(data) => data,
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to parse data file, starting empty");
            T::default()
        }
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either replaced completely or left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), WalletbookError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            WalletbookError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file lives in the same directory so the rename stays atomic.
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| WalletbookError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| WalletbookError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| WalletbookError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| WalletbookError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        WalletbookError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
