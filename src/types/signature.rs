/// One byte the patcher expects to find at an absolute file offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureSlot {
    pub offset: usize,
    pub expected: u8,
}

impl SignatureSlot {
    pub const fn new(offset: usize, expected: u8) -> Self {
        Self { offset, expected }
    }
}

/// Per-byte signature of one build's button jump table
///
/// Slots are in Xbox order (A, B, X, Y). The expected byte of slot `i` is
/// the handler byte of NeoGeo button `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub label: &'static str,
    pub slots: [SignatureSlot; 4],
}

impl Signature {
    /// Smallest file length that contains every slot
    pub fn required_len(&self) -> usize {
        self.slots.iter().map(|slot| slot.offset + 1).max().unwrap_or(0)
    }
}

/// Four little-endian 32-bit handler addresses starting at `offset`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpTable {
    pub label: &'static str,
    pub offset: usize,
    pub entries: [u32; 4],
}

impl JumpTable {
    pub const ENTRY_SIZE: usize = 4;

    /// File offset of entry `index`
    pub fn entry_offset(&self, index: usize) -> usize {
        self.offset + index * Self::ENTRY_SIZE
    }

    /// Number of bytes covered by the table
    pub fn span(&self) -> usize {
        self.entries.len() * Self::ENTRY_SIZE
    }
}
