use crate::source::{RandomAccessSource, ReadError};

use super::charset::{Charset, StringValue};
use super::layout;
use super::order::ByteOrder;

/// Typed decoder addressed by absolute index.
///
/// Offers the same value decoders as
/// [`SequentialReader`](super::SequentialReader) but every call names its
/// starting index; nothing advances between calls. Repositioning an
/// underlying stream is the caller's business.
///
/// # Examples
/// ```
/// use byteseq_core::{ByteOrder, RandomAccessReader};
///
/// let data: &[u8] = &[0x00, 0x01, 0x00, 0x02];
/// let mut reader = RandomAccessReader::new(data);
/// assert_eq!(reader.get_u16(2)?, 2);
/// assert_eq!(reader.get_u16(0)?, 1);
/// # Ok::<(), byteseq_core::ReadError>(())
/// ```
#[derive(Debug)]
pub struct RandomAccessReader<S> {
    source: S,
    order: ByteOrder,
}

impl<S: RandomAccessSource> RandomAccessReader<S> {
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

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Total number of addressable bytes.
    pub fn len(&mut self) -> Result<u64, ReadError> {
        self.source.len()
    }

    pub fn is_empty(&mut self) -> Result<bool, ReadError> {
        self.source.is_empty()
    }

    /// Whether `count` bytes starting at `index` lie within the data.
    pub fn is_valid_index(&mut self, index: u64, count: u64) -> Result<bool, ReadError> {
        let len = self.source.len()?;
        Ok(index
            .checked_add(count)
            .is_some_and(|end| end <= len))
    }

    fn get_array<const N: usize>(&mut self, index: u64) -> Result<[u8; N], ReadError> {
        let mut bytes = [0u8; N];
        self.source.read_at(index, &mut bytes)?;
        Ok(bytes)
    }

    pub fn get_u8(&mut self, index: u64) -> Result<u8, ReadError> {
        Ok(self.get_array::<1>(index)?[0])
    }

    pub fn get_i8(&mut self, index: u64) -> Result<i8, ReadError> {
        Ok(self.get_u8(index)? as i8)
    }

    pub fn get_u16(&mut self, index: u64) -> Result<u16, ReadError> {
        let bytes = self.get_array::<{ layout::U16_WIDTH }>(index)?;
        Ok(self.order.u16_from(bytes))
    }

    pub fn get_i16(&mut self, index: u64) -> Result<i16, ReadError> {
        Ok(self.get_u16(index)? as i16)
    }

    pub fn get_u32(&mut self, index: u64) -> Result<u32, ReadError> {
        let bytes = self.get_array::<{ layout::U32_WIDTH }>(index)?;
        Ok(self.order.u32_from(bytes))
    }

    pub fn get_i32(&mut self, index: u64) -> Result<i32, ReadError> {
        Ok(self.get_u32(index)? as i32)
    }

    pub fn get_i64(&mut self, index: u64) -> Result<i64, ReadError> {
        let bytes = self.get_array::<{ layout::U64_WIDTH }>(index)?;
        Ok(self.order.u64_from(bytes) as i64)
    }

    pub fn get_f32(&mut self, index: u64) -> Result<f32, ReadError> {
        Ok(f32::from_bits(self.get_i32(index)? as u32))
    }

    pub fn get_f64(&mut self, index: u64) -> Result<f64, ReadError> {
        Ok(f64::from_bits(self.get_i64(index)? as u64))
    }

    pub fn get_s15_fixed16(&mut self, index: u64) -> Result<f32, ReadError> {
        let bytes = self.get_array::<{ layout::FIXED_16_16_WIDTH }>(index)?;
        Ok(self.order.fixed_16_16_from(bytes))
    }

    /// `count` bytes starting at `index`; the range is checked against the
    /// data length before anything is allocated.
    pub fn get_bytes(&mut self, index: u64, count: usize) -> Result<Vec<u8>, ReadError> {
        let fits = u64::try_from(count)
            .map_or(Ok(false), |count| self.is_valid_index(index, count))?;
        if !fits {
            return Err(ReadError::EndOfSequence);
        }
        let mut bytes = vec![0u8; count];
        self.source.read_at(index, &mut bytes)?;
        Ok(bytes)
    }

    pub fn get_string(
        &mut self,
        index: u64,
        len: usize,
        charset: Charset,
    ) -> Result<String, ReadError> {
        let bytes = self.get_bytes(index, len)?;
        Ok(charset.decode(&bytes))
    }

    pub fn get_string_value(
        &mut self,
        index: u64,
        len: usize,
        charset: Charset,
    ) -> Result<StringValue, ReadError> {
        let bytes = self.get_bytes(index, len)?;
        Ok(StringValue::new(bytes, charset))
    }

    /// Bytes from `index` up to the first NUL, looking at most `max_len` bytes
    /// ahead. Running off the end of the data before either limit is reached
    /// is an error.
    pub fn get_null_terminated_bytes(
        &mut self,
        index: u64,
        max_len: usize,
    ) -> Result<Vec<u8>, ReadError> {
        let mut bytes = Vec::new();
        let mut pos = index;
        while bytes.len() < max_len {
            let byte = self.get_u8(pos)?;
            if byte == layout::NUL {
                break;
            }
            bytes.push(byte);
            pos = pos.checked_add(1).ok_or(ReadError::EndOfSequence)?;
        }
        Ok(bytes)
    }

    pub fn get_null_terminated_string(
        &mut self,
        index: u64,
        max_len: usize,
        charset: Charset,
    ) -> Result<String, ReadError> {
        let bytes = self.get_null_terminated_bytes(index, max_len)?;
        Ok(charset.decode(&bytes))
    }
}
