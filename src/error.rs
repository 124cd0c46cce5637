/// Error types shared by the patcher and the inspector

use crate::patcher::SignatureAttempt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NeomapError>;

#[derive(Debug, Error)]
pub enum NeomapError {
    #[error("Xbox button {letter} for NeoGeo button {position} is invalid (use A, B, X, or Y)")]
    InvalidButton { letter: String, position: char },

    #[error("\"{}\" does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read file \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File \"{}\" is too small for this patch. It is {size} bytes, at least {required} are needed", path.display())]
    TooSmall {
        path: PathBuf,
        size: usize,
        required: usize,
        rejected: Vec<SignatureAttempt>,
    },

    #[error("File \"{}\" did not match any known signature ({} tried)", path.display(), rejected.len())]
    SignatureMismatch {
        path: PathBuf,
        rejected: Vec<SignatureAttempt>,
    },

    #[error("Could not write file \"{}\": {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl NeomapError {
    /// Process exit code for this failure (2 is left to clap usage errors)
    pub fn exit_code(&self) -> u8 {
        match self {
            NeomapError::InvalidButton { .. } => 3,
            NeomapError::NotFound(_) => 4,
            NeomapError::Read { .. } => 5,
            NeomapError::TooSmall { .. } => 6,
            NeomapError::SignatureMismatch { .. } => 7,
            NeomapError::Write { .. } => 8,
        }
    }

    /// Signatures that were tried and rejected before this failure
    pub fn rejected(&self) -> &[SignatureAttempt] {
        match self {
            NeomapError::TooSmall { rejected, .. } | NeomapError::SignatureMismatch { rejected, .. } => {
                rejected
            }
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let io = || std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let errors = [
            NeomapError::InvalidButton {
                letter: "Q".to_string(),
                position: 'A',
            },
            NeomapError::NotFound(PathBuf::from("a.exe")),
            NeomapError::Read {
                path: PathBuf::from("a.exe"),
                source: io(),
            },
            NeomapError::TooSmall {
                path: PathBuf::from("a.exe"),
                size: 1,
                required: 2,
                rejected: Vec::new(),
            },
            NeomapError::SignatureMismatch {
                path: PathBuf::from("a.exe"),
                rejected: Vec::new(),
            },
            NeomapError::Write {
                path: PathBuf::from("a.exe"),
                source: io(),
            },
        ];

        let mut codes: Vec<u8> = errors.iter().map(NeomapError::exit_code).collect();
        assert!(codes.iter().all(|&code| code != 0 && code != 2));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_invalid_button_message() {
        let err = NeomapError::InvalidButton {
            letter: "Z".to_string(),
            position: 'C',
        };
        assert_eq!(
            err.to_string(),
            "Xbox button Z for NeoGeo button C is invalid (use A, B, X, or Y)"
        );
    }
}
