use crate::error::{NeomapError, Result};
use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::time::SystemTime;

/// Raw contents of an executable, loaded fully into memory
#[derive(Clone, Debug)]
pub struct ExecutableImage {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub modified: Option<SystemTime>,
}

impl ExecutableImage {
    /// Reads the whole file
    pub fn load(path: &Path) -> Result<Self> {
        let meta = stat(path)?;
        let bytes = std::fs::read(path).map_err(|source| NeomapError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());

        Ok(Self {
            path: path.to_path_buf(),
            bytes,
            modified: meta.modified().ok(),
        })
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
            modified: None,
        }
    }

    /// File size in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// File name without its directory
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory the file lives in, with a trailing separator
    ///
    /// Empty for a bare file name.
    pub fn install_path(&self) -> String {
        let dir = match self.path.parent() {
            Some(dir) => dir.display().to_string(),
            None => return String::new(),
        };
        if dir.is_empty() || dir.ends_with(MAIN_SEPARATOR) || dir.ends_with('/') {
            dir
        } else {
            format!("{}{}", dir, MAIN_SEPARATOR)
        }
    }
}

/// File metadata; only a missing file is `NotFound`
pub fn stat(path: &Path) -> Result<Metadata> {
    std::fs::metadata(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => NeomapError::NotFound(path.to_path_buf()),
        _ => NeomapError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}
