pub const U16_WIDTH: usize = 2;
pub const U32_WIDTH: usize = 4;
pub const U64_WIDTH: usize = 8;

/// Width of a 15.16 fixed-point value: two bytes of integer, two of fraction.
pub const FIXED_16_16_WIDTH: usize = 4;
pub const FIXED_16_16_DENOMINATOR: f64 = 65536.0;

pub const NUL: u8 = 0x00;

/// Largest buffer grown in one step by a bulk read of caller-given length.
pub const READ_CHUNK: usize = 8 * 1024;
