/// Output file naming and writing

use crate::error::{NeomapError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const OUTPUT_TAG: &str = "remap";
pub const OUTPUT_EXTENSION: &str = "exe";

/// `<dir>/<stem>-remap-<timestamp>.exe`
pub fn output_path(input: &Path, timestamp: u64) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!("{}-{}-{}.{}", stem, OUTPUT_TAG, timestamp, OUTPUT_EXTENSION);

    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Current Unix time in seconds
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Writes `data` to a new file; an existing file is never overwritten
///
/// On a failed write the partial file is removed.
pub fn write_new_file(path: &Path, data: &[u8]) -> Result<()> {
    let write_err = |source| NeomapError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(write_err)?;

    if let Err(source) = file.write_all(data).and_then(|_| file.sync_all()) {
        drop(file);
        if let Err(err) = std::fs::remove_file(path) {
            tracing::warn!("Could not remove partial file {}: {}", path.display(), err);
        }
        return Err(write_err(source));
    }

    tracing::info!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
