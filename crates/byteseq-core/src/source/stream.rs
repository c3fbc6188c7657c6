use std::io::{self, Read, Seek, SeekFrom};

use super::{ByteSource, RandomAccessSource, ReadError};

/// Sequential source over any `Read`.
///
/// No bytes are buffered beyond what a single call asks for, so the wrapped
/// reader's own position always equals the number of bytes consumed through
/// this source.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use byteseq_core::{ByteSource, StreamSource};
///
/// let mut source = StreamSource::new(Cursor::new(vec![7u8, 8, 9]));
/// assert_eq!(source.next_byte().unwrap(), 7);
/// assert_eq!(source.into_inner().position(), 1);
/// ```
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn next_byte(&mut self) -> Result<u8, ReadError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Err(ReadError::EndOfSequence),
                Ok(_) => return Ok(byte[0]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(ReadError::from(err)),
            }
        }
    }

    fn next_bytes(&mut self, buf: &mut [u8]) -> Result<(), ReadError> {
        self.inner.read_exact(buf).map_err(ReadError::from)
    }

    fn skip_bytes(&mut self, n: u64) -> Result<u64, ReadError> {
        let mut limited = (&mut self.inner).take(n);
        io::copy(&mut limited, &mut io::sink()).map_err(ReadError::from)
    }
}

/// Random-access source over a seekable stream.
///
/// Each read seeks to the requested offset and then restores the stream to
/// where it was, whether the read succeeded or not. Callers that interleave
/// sequential and random-access passes over one stream therefore only manage
/// their own position.
///
/// # Examples
/// ```
/// use std::io::{Cursor, Seek};
///
/// use byteseq_core::{RandomAccessSource, SeekSource};
///
/// let mut cursor = Cursor::new(vec![1u8, 2, 3, 4]);
/// let mut source = SeekSource::new(&mut cursor);
/// let mut buf = [0u8; 2];
/// source.read_at(2, &mut buf).unwrap();
/// assert_eq!(buf, [3, 4]);
/// assert_eq!(cursor.stream_position().unwrap(), 0);
/// ```
#[derive(Debug)]
pub struct SeekSource<R> {
    inner: R,
}

impl<R: Read + Seek> SeekSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_at_and_restore(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let saved = self.inner.stream_position()?;
        let result = self
            .inner
            .seek(SeekFrom::Start(offset))
            .and_then(|_| self.inner.read_exact(buf));
        self.inner.seek(SeekFrom::Start(saved))?;
        result
    }
}

impl<R: Read + Seek> RandomAccessSource for SeekSource<R> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        self.read_at_and_restore(offset, buf)
            .map_err(ReadError::from)
    }

    fn len(&mut self) -> Result<u64, ReadError> {
        let saved = self.inner.stream_position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(saved))?;
        Ok(end)
    }
}
