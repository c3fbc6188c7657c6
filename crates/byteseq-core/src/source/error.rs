use std::io;

use thiserror::Error;

/// Errors produced by byte sources and, unchanged, by the decoders built on them.
///
/// There are exactly two kinds: the data ran out, or the source itself failed.
///
/// # Examples
/// ```
/// use byteseq_core::ReadError;
///
/// let err = ReadError::from(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
/// assert!(err.is_end_of_sequence());
/// ```
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("end of sequence reached")]
    EndOfSequence,
    #[error("source failure: {0}")]
    Source(io::Error),
}

impl ReadError {
    pub fn is_end_of_sequence(&self) -> bool {
        matches!(self, ReadError::EndOfSequence)
    }
}

impl From<io::Error> for ReadError {
    fn from(value: io::Error) -> Self {
        if value.kind() == io::ErrorKind::UnexpectedEof {
            ReadError::EndOfSequence
        } else {
            ReadError::Source(value)
        }
    }
}
