use crate::types::{ButtonMapping, Signature};
use std::fmt;

/// Why a signature did not apply to a buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    TooSmall { size: usize, required: usize },
    Mismatch { offset: usize, found: u8, expected: u8 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooSmall { size, required } => write!(
                f,
                "file is too small ({} bytes, need {})",
                size, required
            ),
            Rejection::Mismatch {
                offset,
                found,
                expected,
            } => write!(
                f,
                "byte at 0x{:08x} is 0x{:02x}, expected 0x{:02x}",
                offset, found, expected
            ),
        }
    }
}

/// A signature that was tried and did not apply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureAttempt {
    pub label: &'static str,
    pub rejection: Rejection,
}

/// A single byte written by a patch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteWrite {
    pub offset: usize,
    pub value: u8,
}

/// Checks that every slot of the signature holds its expected byte
pub fn check_signature(data: &[u8], signature: &Signature) -> Result<(), Rejection> {
    let required = signature.required_len();
    if data.len() < required {
        return Err(Rejection::TooSmall {
            size: data.len(),
            required,
        });
    }

    for slot in &signature.slots {
        let found = data[slot.offset];
        if found != slot.expected {
            return Err(Rejection::Mismatch {
                offset: slot.offset,
                found,
                expected: slot.expected,
            });
        }
    }

    Ok(())
}

/// Rewrites the jump-table slots of `data` according to `mapping`
///
/// Each Xbox slot receives the handler byte of the NeoGeo button mapped to it.
/// Nothing is written unless the whole signature matches.
pub fn apply_signature(
    data: &mut [u8],
    signature: &Signature,
    mapping: &ButtonMapping,
) -> Result<Vec<ByteWrite>, Rejection> {
    check_signature(data, signature)?;

    let writes: Vec<ByteWrite> = signature
        .slots
        .iter()
        .enumerate()
        .map(|(xbox, slot)| ByteWrite {
            offset: slot.offset,
            value: signature.slots[mapping.source_for(xbox)].expected,
        })
        .collect();

    for write in &writes {
        data[write.offset] = write.value;
        tracing::debug!("byte at 0x{:08x} updated to 0x{:02x}", write.offset, write.value);
    }

    Ok(writes)
}
