use super::matcher::{apply_signature, ByteWrite, Rejection, SignatureAttempt};
use super::output::{output_path, unix_timestamp, write_new_file};
use crate::error::{NeomapError, Result};
use crate::signatures::SignatureSet;
use crate::types::{ButtonMapping, ExecutableImage, Signature};
use std::path::{Path, PathBuf};

/// Result of a successful patch
#[derive(Clone, Debug)]
pub struct PatchOutcome {
    /// Signatures tried and rejected before the one that matched
    pub rejected: Vec<SignatureAttempt>,
    pub signature: &'static str,
    pub writes: Vec<ByteWrite>,
    pub output: PathBuf,
}

/// Tries each known signature in priority order and writes the first match
pub struct Patcher {
    signatures: Vec<Signature>,
}

impl Patcher {
    /// Creates a patcher over the built-in signatures
    pub fn new() -> Self {
        Self::with_signatures(SignatureSet::patch_signatures().to_vec())
    }

    pub fn with_signatures(signatures: Vec<Signature>) -> Self {
        Self { signatures }
    }

    /// Patches `exe_path` and writes a new, timestamped file beside it
    pub fn patch_file(&self, exe_path: &Path, mapping: &ButtonMapping) -> Result<PatchOutcome> {
        let image = ExecutableImage::load(exe_path)?;
        self.patch_image(&image, mapping, unix_timestamp())
    }

    /// Patches a loaded image; the image itself is left untouched
    pub fn patch_image(
        &self,
        image: &ExecutableImage,
        mapping: &ButtonMapping,
        timestamp: u64,
    ) -> Result<PatchOutcome> {
        let mut rejected = Vec::with_capacity(self.signatures.len());

        for signature in &self.signatures {
            tracing::info!("Trying patch for {}...", signature.label);

            let mut patched = image.bytes.clone();
            match apply_signature(&mut patched, signature, mapping) {
                Ok(writes) => {
                    let output = output_path(&image.path, timestamp);
                    write_new_file(&output, &patched)?;
                    return Ok(PatchOutcome {
                        rejected,
                        signature: signature.label,
                        writes,
                        output,
                    });
                }
                Err(rejection) => {
                    tracing::info!("{}: {}", signature.label, rejection);
                    rejected.push(SignatureAttempt {
                        label: signature.label,
                        rejection,
                    });
                }
            }
        }

        Err(summarize(image, rejected))
    }
}

impl Default for Patcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Size failure only when every signature was rejected for size
fn summarize(image: &ExecutableImage, rejected: Vec<SignatureAttempt>) -> NeomapError {
    let smallest_required = rejected
        .iter()
        .map(|attempt| match attempt.rejection {
            Rejection::TooSmall { required, .. } => Some(required),
            Rejection::Mismatch { .. } => None,
        })
        .collect::<Option<Vec<usize>>>()
        .and_then(|required| required.into_iter().min());

    match smallest_required {
        Some(required) => NeomapError::TooSmall {
            path: image.path.clone(),
            size: image.size(),
            required,
            rejected,
        },
        None => NeomapError::SignatureMismatch {
            path: image.path.clone(),
            rejected,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signatures::KnownSignatures;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "neomap-patch-{}-{}",
                name,
                std::process::id()
            ));
            std::fs::remove_dir_all(&dir).ok();
            std::fs::create_dir_all(&dir).expect("create temp dir");
            Self(dir)
        }

        fn entries(&self) -> Vec<PathBuf> {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(&self.0)
                .expect("read temp dir")
                .map(|entry| entry.expect("dir entry").path())
                .collect();
            entries.sort();
            entries
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.0).ok();
        }
    }

    fn seeded(signature: &Signature, len: usize) -> Vec<u8> {
        let mut data = vec![0u8; len];
        for slot in &signature.slots {
            data[slot.offset] = slot.expected;
        }
        data
    }

    #[test]
    fn test_patch_humble_build() {
        let dir = TempDir::new("humble");
        let exe = dir.0.join("kof2002.exe");
        let original = seeded(&KnownSignatures::HUMBLE, 0x9000);
        std::fs::write(&exe, &original).unwrap();

        let outcome = Patcher::new()
            .patch_file(&exe, &ButtonMapping::new([1, 0, 2, 3]))
            .expect("patch should succeed");

        assert_eq!(outcome.signature, KnownSignatures::HUMBLE.label);
        assert_eq!(outcome.output.parent(), Some(dir.0.as_path()));

        // GOG is tried first and needs a larger file
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].label, KnownSignatures::GOG_AMAZON.label);
        assert_eq!(
            outcome.rejected[0].rejection,
            Rejection::TooSmall {
                size: 0x9000,
                required: 0x239DD,
            }
        );

        let patched = std::fs::read(&outcome.output).unwrap();
        assert_eq!(patched[0x82F4], 0x2F);
        assert_eq!(patched[0x82F8], 0x28);
        assert_eq!(patched[0x82FC], 0x36);
        assert_eq!(patched[0x8300], 0x3D);

        // Original is untouched
        assert_eq!(std::fs::read(&exe).unwrap(), original);
    }

    #[test]
    fn test_gog_build_takes_priority() {
        let dir = TempDir::new("gog");
        let exe = dir.0.join("mslug.exe");
        let mut data = seeded(&KnownSignatures::GOG_AMAZON, 0x24000);
        for slot in &KnownSignatures::HUMBLE.slots {
            data[slot.offset] = slot.expected;
        }
        std::fs::write(&exe, &data).unwrap();

        let outcome = Patcher::new()
            .patch_file(&exe, &ButtonMapping::new([3, 2, 1, 0]))
            .expect("patch should succeed");

        assert_eq!(outcome.signature, KnownSignatures::GOG_AMAZON.label);
        assert!(outcome.rejected.is_empty());
        let values: Vec<u8> = outcome.writes.iter().map(|w| w.value).collect();
        assert_eq!(values, vec![0x2A, 0x23, 0x1C, 0x15]);
    }

    #[test]
    fn test_no_match_leaves_filesystem_unchanged() {
        let dir = TempDir::new("nomatch");
        let exe = dir.0.join("garou.exe");
        let original: Vec<u8> = (0..0x24000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&exe, &original).unwrap();

        let err = Patcher::new()
            .patch_file(&exe, &ButtonMapping::new([1, 0, 2, 3]))
            .unwrap_err();

        assert!(matches!(err, NeomapError::SignatureMismatch { .. }));
        assert_eq!(
            err.rejected(),
            &[
                SignatureAttempt {
                    label: KnownSignatures::GOG_AMAZON.label,
                    rejection: Rejection::Mismatch {
                        offset: 0x239D0,
                        found: 41,
                        expected: 0x15,
                    },
                },
                SignatureAttempt {
                    label: KnownSignatures::HUMBLE.label,
                    rejection: Rejection::Mismatch {
                        offset: 0x82F4,
                        found: 141,
                        expected: 0x28,
                    },
                },
            ]
        );
        assert_eq!(std::fs::read(&exe).unwrap(), original);
        assert_eq!(dir.entries(), vec![exe]);
    }

    #[test]
    fn test_small_file_reports_size() {
        let dir = TempDir::new("small");
        let exe = dir.0.join("tiny.exe");
        std::fs::write(&exe, [0u8; 64]).unwrap();

        let err = Patcher::new()
            .patch_file(&exe, &ButtonMapping::IDENTITY)
            .unwrap_err();

        match err {
            NeomapError::TooSmall { size, required, .. } => {
                assert_eq!(size, 64);
                assert_eq!(required, 0x8301);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err_exit(&exe), 6);
    }

    #[test]
    fn test_mid_size_file_is_a_mismatch() {
        // Big enough for Humble, too small for GOG
        let image = ExecutableImage::from_bytes("mid.exe", vec![0u8; 0x9000]);
        let err = Patcher::new()
            .patch_image(&image, &ButtonMapping::IDENTITY, 1)
            .unwrap_err();
        assert!(matches!(err, NeomapError::SignatureMismatch { .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new("missing");
        let err = Patcher::new()
            .patch_file(&dir.0.join("nope.exe"), &ButtonMapping::IDENTITY)
            .unwrap_err();
        assert!(matches!(err, NeomapError::NotFound(_)));
        assert!(dir.entries().is_empty());
    }

    #[test]
    fn test_existing_output_is_a_write_error() {
        let dir = TempDir::new("collision");
        let exe = dir.0.join("kof98.exe");
        let image = ExecutableImage::from_bytes(&exe, seeded(&KnownSignatures::HUMBLE, 0x9000));
        let taken = output_path(&exe, 7);
        std::fs::write(&taken, b"keep").unwrap();

        let err = Patcher::new()
            .patch_image(&image, &ButtonMapping::IDENTITY, 7)
            .unwrap_err();

        assert!(matches!(err, NeomapError::Write { .. }));
        assert_eq!(std::fs::read(&taken).unwrap(), b"keep".to_vec());
    }

    fn err_exit(exe: &Path) -> u8 {
        Patcher::new()
            .patch_file(exe, &ButtonMapping::IDENTITY)
            .map(|_| 0)
            .unwrap_or_else(|err| err.exit_code())
    }
}
