use std::ops::Range;

use crate::decode::ByteOrder;

/// Every multi-byte TGA field is stored least significant byte first.
pub const BYTE_ORDER: ByteOrder = ByteOrder::LittleEndian;

pub const HEADER_SIZE: usize = 18;

pub const FOOTER_SIZE: u64 = 26;
pub const FOOTER_SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";

pub const EXTENSION_AREA_SIZE: u16 = 495;
pub const AUTHOR_NAME_LEN: usize = 41;
pub const COMMENT_LINES: usize = 4;
pub const COMMENT_LINE_LEN: usize = 81;
pub const JOB_NAME_LEN: usize = 41;
pub const SOFTWARE_ID_LEN: usize = 41;

pub const TAG_COUNT_SIZE: u64 = 2;
pub const TAG_ENTRY_SIZE: u64 = 10;

pub const COLOR_MAP_TYPES: Range<u8> = 0..2;
pub const IMAGE_TYPES: [u8; 7] = [0, 1, 2, 3, 9, 10, 11];
