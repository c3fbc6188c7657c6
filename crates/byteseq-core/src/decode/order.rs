use serde::{Deserialize, Serialize};

use super::layout;

/// Order in which the bytes of a multi-byte value appear in the data.
///
/// Big-endian ("Motorola") puts the most significant byte first and is the
/// default; little-endian ("Intel") puts the least significant byte first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    pub fn is_big_endian(self) -> bool {
        self == ByteOrder::BigEndian
    }

    pub fn u16_from(self, bytes: [u8; layout::U16_WIDTH]) -> u16 {
        match self {
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
        }
    }

    pub fn u32_from(self, bytes: [u8; layout::U32_WIDTH]) -> u32 {
        match self {
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
        }
    }

    pub fn u64_from(self, bytes: [u8; layout::U64_WIDTH]) -> u64 {
        match self {
            ByteOrder::BigEndian => u64::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u64::from_le_bytes(bytes),
        }
    }

    /// Combine four bytes into a 15.16 fixed-point value.
    ///
    /// Big-endian data holds the integer half first, each half MSB-first.
    /// Little-endian data holds the fraction half first, each half LSB-first.
    /// Both halves are read as unsigned 16-bit quantities.
    pub fn fixed_16_16_from(self, bytes: [u8; layout::FIXED_16_16_WIDTH]) -> f32 {
        let (integer, fraction) = match self {
            ByteOrder::BigEndian => (
                u16::from_be_bytes([bytes[0], bytes[1]]),
                u16::from_be_bytes([bytes[2], bytes[3]]),
            ),
            ByteOrder::LittleEndian => (
                u16::from_le_bytes([bytes[2], bytes[3]]),
                u16::from_le_bytes([bytes[0], bytes[1]]),
            ),
        };
        (f64::from(integer) + f64::from(fraction) / layout::FIXED_16_16_DENOMINATOR) as f32
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteOrder::BigEndian => write!(f, "big-endian"),
            ByteOrder::LittleEndian => write!(f, "little-endian"),
        }
    }
}
