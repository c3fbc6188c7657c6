//! Byte sources.
//!
//! A source is the only place where bytes come from; decoders never touch a
//! buffer or stream directly. Two capabilities exist:
//! - [`ByteSource`]: forward-only, one byte (or one run of bytes) at a time.
//! - [`RandomAccessSource`]: reads addressed by absolute offset, no cursor.
//!
//! Concrete sources cover in-memory buffers (`slice`) and `std::io` streams
//! (`stream`). All I/O in this crate is confined to this module.

mod error;
mod slice;
mod stream;

pub use error::ReadError;
pub use slice::SliceSource;
pub use stream::{SeekSource, StreamSource};

/// Forward-only supply of bytes.
///
/// Every successful call advances the source by exactly the number of bytes
/// returned. On shortage, bytes that were available are still consumed.
pub trait ByteSource {
    /// Return the next byte, or fail with [`ReadError::EndOfSequence`].
    fn next_byte(&mut self) -> Result<u8, ReadError>;

    /// Fill `buf` completely from the source.
    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), ReadError>;

    /// Advance by up to `n` bytes and return how many were actually skipped.
    ///
    /// A count below `n` means the data ended. Only genuine source failures
    /// are reported as errors.
    fn skip_bytes(&mut self, n: u64) -> Result<u64, ReadError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Result<u8, ReadError> {
        (**self).next_byte()
    }

    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        (**self).next_bytes(buf)
    }

    fn skip_bytes(&mut self, n: u64) -> Result<u64, ReadError> {
        (**self).skip_bytes(n)
    }
}

/// Offset-addressed supply of bytes.
///
/// Reads never move an observable position: two reads at the same offset
/// return the same bytes.
pub trait RandomAccessSource {
    /// Fill `buf` with the bytes starting at `offset`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), ReadError>;

    /// Total number of addressable bytes.
    fn len(&mut self) -> Result<u64, ReadError>;

    fn is_empty(&mut self) -> Result<bool, ReadError> {
        Ok(self.len()? == 0)
    }
}

impl<S: RandomAccessSource + ?Sized> RandomAccessSource for &mut S {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        (**self).read_at(offset, buf)
    }

    fn len(&mut self) -> Result<u64, ReadError> {
        (**self).len()
    }
}
