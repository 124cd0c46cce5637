/// Known button jump tables of DotEmu's Neo Geo executables
///
/// 各ディストリビューションでジャンプテーブルの位置が異なる

use crate::types::{JumpTable, Signature, SignatureSlot};

pub struct KnownTables;

impl KnownTables {
    /// GOG / Amazon 版
    pub const GOG_AMAZON: JumpTable = JumpTable {
        label: "GOG and Amazon releases",
        offset: 0x0002_39D0,
        entries: [0x0042_4515, 0x0042_451C, 0x0042_4523, 0x0042_452A],
    };

    /// Humble Bundle 版
    pub const HUMBLE: JumpTable = JumpTable {
        label: "Humble releases",
        offset: 0x0000_82F4,
        entries: [0x0040_8E28, 0x0040_8E2F, 0x0040_8E36, 0x0040_8E3D],
    };
}

pub struct KnownSignatures;

impl KnownSignatures {
    /// GOG / Amazon 版: ハンドラのアドレス下位バイト
    pub const GOG_AMAZON: Signature = Signature {
        label: "GOG and Amazon releases",
        slots: [
            SignatureSlot::new(0x239D0, 0x15),
            SignatureSlot::new(0x239D4, 0x1C),
            SignatureSlot::new(0x239D8, 0x23),
            SignatureSlot::new(0x239DC, 0x2A),
        ],
    };

    /// Humble Bundle 版
    pub const HUMBLE: Signature = Signature {
        label: "Humble releases",
        slots: [
            SignatureSlot::new(0x82F4, 0x28),
            SignatureSlot::new(0x82F8, 0x2F),
            SignatureSlot::new(0x82FC, 0x36),
            SignatureSlot::new(0x8300, 0x3D),
        ],
    };
}

/// Ordered signature sets used by each tool
pub struct SignatureSet;

impl SignatureSet {
    /// Patch priority: GOG/Amazon first
    pub const PATCH_ORDER: [Signature; 2] = [KnownSignatures::GOG_AMAZON, KnownSignatures::HUMBLE];

    /// Inspection order: Humble first
    pub const INSPECT_ORDER: [JumpTable; 2] = [KnownTables::HUMBLE, KnownTables::GOG_AMAZON];

    pub fn patch_signatures() -> &'static [Signature] {
        &Self::PATCH_ORDER
    }

    pub fn jump_tables() -> &'static [JumpTable] {
        &Self::INSPECT_ORDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures_agree_with_jump_tables() {
        let pairs = [
            (KnownSignatures::GOG_AMAZON, KnownTables::GOG_AMAZON),
            (KnownSignatures::HUMBLE, KnownTables::HUMBLE),
        ];

        for (signature, table) in pairs {
            assert_eq!(signature.label, table.label);
            for (i, slot) in signature.slots.iter().enumerate() {
                assert_eq!(slot.offset, table.entry_offset(i));
                assert_eq!(slot.expected, table.entries[i].to_le_bytes()[0]);
            }
        }
    }

    #[test]
    fn test_priority_orders() {
        assert_eq!(SignatureSet::patch_signatures()[0].label, "GOG and Amazon releases");
        assert_eq!(SignatureSet::jump_tables()[0].label, "Humble releases");
    }
}
