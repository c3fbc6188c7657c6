use crate::source::{ByteSource, ReadError};

use super::charset::{Charset, StringValue};
use super::layout;
use super::order::ByteOrder;

/// Forward-only typed decoder over a [`ByteSource`].
///
/// The cursor lives in the wrapped source and only moves forward. Every
/// multi-byte value is assembled from single-byte reads, so a value cut short
/// by the end of data still consumes the bytes that were present before the
/// read fails.
///
/// The byte order is instance state, not a per-call argument: changing it
/// affects the reads issued afterwards and nothing already decoded.
///
/// # Examples
/// ```
/// use byteseq_core::{ByteOrder, SequentialReader, SliceSource};
///
/// let data = [0x00, 0x2A, 0x2A, 0x00];
/// let mut reader = SequentialReader::new(SliceSource::new(&data));
/// assert_eq!(reader.read_u16()?, 42);
/// reader.set_byte_order(ByteOrder::LittleEndian);
/// assert_eq!(reader.read_u16()?, 42);
/// # Ok::<(), byteseq_core::ReadError>(())
/// ```
#[derive(Debug)]
pub struct SequentialReader<S> {
    source: S,
    order: ByteOrder,
}

impl<S: ByteSource> SequentialReader<S> {
    /// Wrap `source` with the default (big-endian) byte order.
    pub fn new(source: S) -> Self {
        Self::with_byte_order(source, ByteOrder::default())
    }

    pub fn with_byte_order(source: S, order: ByteOrder) -> Self {
        Self { source, order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let mut bytes = [0u8; N];
        for byte in &mut bytes {
            *byte = self.source.next_byte()?;
        }
        Ok(bytes)
    }

    /// Unsigned 8-bit value (0..=255).
    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        self.source.next_byte()
    }

    /// Signed 8-bit value, two's complement (-128..=127).
    pub fn read_i8(&mut self) -> Result<i8, ReadError> {
        Ok(self.source.next_byte()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        let bytes = self.read_array::<{ layout::U16_WIDTH }>()?;
        Ok(self.order.u16_from(bytes))
    }

    pub fn read_i16(&mut self) -> Result<i16, ReadError> {
        Ok(self.read_u16()? as i16)
    }

    /// Unsigned 32-bit value; `u32` covers the whole unsigned range.
    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        let bytes = self.read_array::<{ layout::U32_WIDTH }>()?;
        Ok(self.order.u32_from(bytes))
    }

    pub fn read_i32(&mut self) -> Result<i32, ReadError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_i64(&mut self) -> Result<i64, ReadError> {
        let bytes = self.read_array::<{ layout::U64_WIDTH }>()?;
        Ok(self.order.u64_from(bytes) as i64)
    }

    /// IEEE-754 single precision over the bits of [`read_i32`](Self::read_i32).
    pub fn read_f32(&mut self) -> Result<f32, ReadError> {
        Ok(f32::from_bits(self.read_i32()? as u32))
    }

    /// IEEE-754 double precision over the bits of [`read_i64`](Self::read_i64).
    pub fn read_f64(&mut self) -> Result<f64, ReadError> {
        Ok(f64::from_bits(self.read_i64()? as u64))
    }

    /// 15.16 fixed-point value (integer + fraction / 65536).
    ///
    /// See [`ByteOrder::fixed_16_16_from`] for the half order of each byte order.
    pub fn read_s15_fixed16(&mut self) -> Result<f32, ReadError> {
        let bytes = self.read_array::<{ layout::FIXED_16_16_WIDTH }>()?;
        Ok(self.order.fixed_16_16_from(bytes))
    }

    /// Exactly `count` bytes.
    ///
    /// The buffer grows in chunks as bytes arrive, so a `count` far beyond
    /// the data fails with [`ReadError::EndOfSequence`] after consuming what
    /// was left instead of allocating `count` bytes up front.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, ReadError> {
        let mut bytes = Vec::with_capacity(count.min(layout::READ_CHUNK));
        while bytes.len() < count {
            let start = bytes.len();
            let step = (count - start).min(layout::READ_CHUNK);
            bytes.resize(start + step, 0);
            self.source.next_bytes(&mut bytes[start..])?;
        }
        Ok(bytes)
    }

    /// Fill `buf` completely.
    pub fn read_bytes_into(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        self.source.next_bytes(buf)
    }

    /// Advance exactly `n` bytes, failing with [`ReadError::EndOfSequence`]
    /// when fewer remain. Bytes that were skipped before the shortage stay
    /// consumed.
    pub fn skip(&mut self, n: u64) -> Result<(), ReadError> {
        if self.source.skip_bytes(n)? != n {
            return Err(ReadError::EndOfSequence);
        }
        Ok(())
    }

    /// Like [`skip`](Self::skip), but a shortage is reported as `Ok(false)`.
    /// Source failures are still errors.
    pub fn try_skip(&mut self, n: u64) -> Result<bool, ReadError> {
        Ok(self.source.skip_bytes(n)? == n)
    }

    /// `len` bytes decoded as UTF-8.
    pub fn read_string(&mut self, len: usize) -> Result<String, ReadError> {
        self.read_string_with(len, Charset::Utf8)
    }

    pub fn read_string_with(&mut self, len: usize, charset: Charset) -> Result<String, ReadError> {
        let bytes = self.read_bytes(len)?;
        Ok(charset.decode(&bytes))
    }

    pub fn read_string_value(
        &mut self,
        len: usize,
        charset: Charset,
    ) -> Result<StringValue, ReadError> {
        let bytes = self.read_bytes(len)?;
        Ok(StringValue::new(bytes, charset))
    }

    /// Bytes up to a NUL terminator, reading at most `max_len` bytes.
    ///
    /// The terminator is consumed but not returned. When no terminator occurs
    /// within `max_len` bytes, exactly `max_len` bytes are consumed and
    /// returned.
    pub fn read_null_terminated_bytes(&mut self, max_len: usize) -> Result<Vec<u8>, ReadError> {
        let mut bytes = Vec::new();
        while bytes.len() < max_len {
            let byte = self.source.next_byte()?;
            if byte == layout::NUL {
                break;
            }
            bytes.push(byte);
        }
        Ok(bytes)
    }

    /// NUL-terminated UTF-8 text; see
    /// [`read_null_terminated_bytes`](Self::read_null_terminated_bytes) for
    /// how much is consumed.
    pub fn read_null_terminated_string(&mut self, max_len: usize) -> Result<String, ReadError> {
        self.read_null_terminated_string_with(max_len, Charset::Utf8)
    }

    pub fn read_null_terminated_string_with(
        &mut self,
        max_len: usize,
        charset: Charset,
    ) -> Result<String, ReadError> {
        let bytes = self.read_null_terminated_bytes(max_len)?;
        Ok(charset.decode(&bytes))
    }

    pub fn read_null_terminated_string_value(
        &mut self,
        max_len: usize,
        charset: Charset,
    ) -> Result<StringValue, ReadError> {
        let bytes = self.read_null_terminated_bytes(max_len)?;
        Ok(StringValue::new(bytes, charset))
    }
}

#[cfg(test)]
mod tests {
    use super::SequentialReader;
    use crate::decode::{ByteOrder, Charset};
    use crate::decode::layout;
    use crate::source::{ByteSource, ReadError, SliceSource, StreamSource};
    use std::io::{self, Read};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device unplugged"))
        }
    }

    fn reader(bytes: &[u8]) -> SequentialReader<SliceSource<'_>> {
        SequentialReader::new(SliceSource::new(bytes))
    }

    #[test]
    fn signed_bytes_are_twos_complement() {
        let mut r = reader(&[0xFF, 0x7F, 0x80]);
        assert_eq!(r.read_i8().unwrap(), -1);
        assert_eq!(r.read_i8().unwrap(), 127);
        assert_eq!(r.read_i8().unwrap(), -128);
    }

    #[test]
    fn unsigned_byte_covers_full_range() {
        let mut r = reader(&[0x00, 0xFF]);
        assert_eq!(r.read_u8().unwrap(), 0);
        assert_eq!(r.read_u8().unwrap(), 255);
    }

    #[test]
    fn sixteen_bit_values_in_both_orders() {
        let mut r = reader(&[0xFF, 0xFE, 0xFE, 0xFF]);
        assert_eq!(r.read_i16().unwrap(), -2);
        r.set_byte_order(ByteOrder::LittleEndian);
        assert_eq!(r.read_u16().unwrap(), 0xFFFE);
    }

    #[test]
    fn thirty_two_bit_unsigned_does_not_go_negative() {
        let mut r = reader(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(r.read_u32().unwrap(), u32::MAX);
        assert_eq!(r.read_i32().unwrap(), -1);
    }

    #[test]
    fn sixty_four_bit_little_endian() {
        let data = (-2i64).to_le_bytes();
        let mut r = SequentialReader::with_byte_order(
            SliceSource::new(&data),
            ByteOrder::LittleEndian,
        );
        assert_eq!(r.read_i64().unwrap(), -2);
    }

    #[test]
    fn float32_one() {
        let mut r = reader(&[0x3F, 0x80, 0x00, 0x00]);
        assert_eq!(r.read_f32().unwrap(), 1.0);
    }

    #[test]
    fn float_follows_integer_byte_order() {
        let single = 1.5f32.to_le_bytes();
        let double = (-0.25f64).to_le_bytes();
        let mut data = Vec::new();
        data.extend_from_slice(&single);
        data.extend_from_slice(&double);
        let mut r = reader(&data);
        r.set_byte_order(ByteOrder::LittleEndian);
        assert_eq!(r.read_f32().unwrap(), 1.5);
        assert_eq!(r.read_f64().unwrap(), -0.25);
    }

    #[test]
    fn fixed_point_big_endian() {
        let mut r = reader(&[0x00, 0x02, 0x80, 0x00]);
        assert_eq!(r.read_s15_fixed16().unwrap(), 2.5);
    }

    #[test]
    fn fixed_point_little_endian_reads_fraction_first() {
        let mut r = reader(&[0x00, 0x40, 0x01, 0x00]);
        r.set_byte_order(ByteOrder::LittleEndian);
        assert_eq!(r.read_s15_fixed16().unwrap(), 1.25);
    }

    #[test]
    fn truncated_integer_consumes_available_bytes() {
        let mut r = reader(&[0x01, 0x02]);
        assert!(matches!(r.read_u32(), Err(ReadError::EndOfSequence)));
        assert_eq!(r.get_ref().position(), 2);
    }

    #[test]
    fn read_bytes_exact_and_empty() {
        let mut r = reader(&[1, 2, 3]);
        assert_eq!(r.read_bytes(0).unwrap(), Vec::<u8>::new());
        assert_eq!(r.read_bytes(2).unwrap(), vec![1, 2]);
        assert!(r.read_bytes(2).unwrap_err().is_end_of_sequence());
    }

    #[test]
    fn oversized_read_fails_at_end_of_data() {
        let mut r = reader(&[1, 2, 3]);
        assert!(r.read_bytes(usize::MAX).unwrap_err().is_end_of_sequence());
        assert_eq!(r.get_ref().position(), 3);

        let mut r = reader(&[b'a'; 10]);
        assert!(r.read_string(4_000_000_000_000).unwrap_err().is_end_of_sequence());
        assert_eq!(r.get_ref().position(), 10);
    }

    #[test]
    fn read_bytes_spanning_several_chunks() {
        let data: Vec<u8> = (0..layout::READ_CHUNK * 2 + 5).map(|i| i as u8).collect();
        let mut r = reader(&data);
        assert_eq!(r.read_bytes(data.len() - 1).unwrap(), data[..data.len() - 1]);
        assert_eq!(r.read_u8().unwrap(), data[data.len() - 1]);
    }

    #[test]
    fn source_failure_is_not_end_of_sequence() {
        let mut r = SequentialReader::new(StreamSource::new(FailingReader));
        assert!(matches!(r.try_skip(4), Err(ReadError::Source(_))));
        assert!(matches!(r.skip(4), Err(ReadError::Source(_))));
        assert!(matches!(r.read_u32(), Err(ReadError::Source(_))));
        assert!(matches!(r.read_bytes(3), Err(ReadError::Source(_))));
        assert!(matches!(
            r.read_null_terminated_string(8),
            Err(ReadError::Source(_))
        ));
    }

    #[test]
    fn read_bytes_into_fills_buffer() {
        let mut r = reader(&[9, 8, 7]);
        let mut buf = [0u8; 3];
        r.read_bytes_into(&mut buf).unwrap();
        assert_eq!(buf, [9, 8, 7]);
    }

    #[test]
    fn skip_fails_on_shortage_and_try_skip_does_not() {
        let data = [0u8; 3];
        let mut r = reader(&data);
        assert!(matches!(r.skip(5), Err(ReadError::EndOfSequence)));

        let mut r = reader(&data);
        assert!(!r.try_skip(5).unwrap());

        let mut r = reader(&data);
        r.skip(0).unwrap();
        assert!(r.try_skip(3).unwrap());
        assert!(r.read_u8().unwrap_err().is_end_of_sequence());
    }

    #[test]
    fn fixed_length_string_consumes_all_bytes() {
        let mut r = reader(b"AB\0CD");
        assert_eq!(r.read_string(3).unwrap(), "AB\0");
        assert_eq!(r.read_string(2).unwrap(), "CD");
    }

    #[test]
    fn string_with_charset() {
        let mut r = reader(&[0x00, 0xE9, 0xE9]);
        assert_eq!(r.read_string_with(2, Charset::Utf16Be).unwrap(), "\u{E9}");
        let value = r.read_string_value(1, Charset::Latin1).unwrap();
        assert_eq!(value.to_string(), "é");
        assert_eq!(value.bytes(), &[0xE9]);
    }

    #[test]
    fn null_terminated_stops_at_terminator() {
        let data = [0x41, 0x42, 0x00, 0x43, 0x44];
        let mut r = reader(&data);
        assert_eq!(r.read_null_terminated_string(5).unwrap(), "AB");
        assert_eq!(r.get_ref().position(), 3);
        assert_eq!(r.read_u8().unwrap(), 0x43);
    }

    #[test]
    fn null_terminated_stops_at_limit() {
        let data = [0x41, 0x42, 0x43, 0x44];
        let mut r = reader(&data);
        assert_eq!(r.read_null_terminated_string(3).unwrap(), "ABC");
        assert_eq!(r.get_ref().position(), 3);
    }

    #[test]
    fn null_terminated_value_and_zero_limit() {
        let mut r = reader(&[0x00, 0x61, 0x00]);
        assert!(r.read_null_terminated_bytes(0).unwrap().is_empty());
        assert_eq!(r.get_ref().position(), 0);
        assert_eq!(r.read_null_terminated_string(4).unwrap(), "");
        let value = r
            .read_null_terminated_string_value(4, Charset::Ascii)
            .unwrap();
        assert_eq!(value.to_string(), "a");
    }

    #[test]
    fn null_terminated_without_terminator_before_end_fails() {
        let mut r = reader(&[0x41, 0x42]);
        assert!(r.read_null_terminated_string(5).unwrap_err().is_end_of_sequence());
    }

    #[test]
    fn byte_order_change_is_not_retroactive() {
        let mut r = reader(&[0x01, 0x00, 0x01, 0x00]);
        let first = r.read_u16().unwrap();
        r.set_byte_order(ByteOrder::LittleEndian);
        let second = r.read_u16().unwrap();
        assert_eq!(first, 0x0100);
        assert_eq!(second, 0x0001);
        assert_eq!(r.byte_order(), ByteOrder::LittleEndian);
    }

    #[test]
    fn works_through_a_borrowed_source() {
        let mut source = SliceSource::new(&[0x12, 0x34, 0x56]);
        {
            let mut r = SequentialReader::new(&mut source);
            assert_eq!(r.read_u16().unwrap(), 0x1234);
        }
        assert_eq!(source.next_byte().unwrap(), 0x56);
    }
}
