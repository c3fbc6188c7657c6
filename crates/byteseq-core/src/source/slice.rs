use super::{ByteSource, RandomAccessSource, ReadError};

/// Sequential source over an in-memory buffer.
///
/// # Examples
/// ```
/// use byteseq_core::{ByteSource, SliceSource};
///
/// let mut source = SliceSource::new(&[0x01, 0x02, 0x03]);
/// assert_eq!(source.next_byte().unwrap(), 0x01);
/// assert_eq!(source.position(), 1);
/// assert_eq!(source.remaining(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Result<u8, ReadError> {
        let byte = self
            .bytes
            .get(self.pos)
            .copied()
            .ok_or(ReadError::EndOfSequence)?;
        self.pos += 1;
        Ok(byte)
    }

    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        let rest = self.rest();
        if rest.len() < buf.len() {
            // A short read still consumes what was there, like a stream would.
            self.pos = self.bytes.len();
            return Err(ReadError::EndOfSequence);
        }
        buf.copy_from_slice(&rest[..buf.len()]);
        self.pos += buf.len();
        Ok(())
    }

    fn skip_bytes(&mut self, n: u64) -> Result<u64, ReadError> {
        let step = usize::try_from(n)
            .unwrap_or(usize::MAX)
            .min(self.remaining());
        self.pos += step;
        Ok(step as u64)
    }
}

impl RandomAccessSource for &[u8] {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        let start = usize::try_from(offset).map_err(|_| ReadError::EndOfSequence)?;
        let end = start
            .checked_add(buf.len())
            .ok_or(ReadError::EndOfSequence)?;
        let bytes = self.get(start..end).ok_or(ReadError::EndOfSequence)?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    fn len(&mut self) -> Result<u64, ReadError> {
        let bytes: &[u8] = self;
        Ok(bytes.len() as u64)
    }
}
