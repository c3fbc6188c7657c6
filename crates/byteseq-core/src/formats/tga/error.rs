use thiserror::Error;

use crate::source::ReadError;

/// Errors returned by TGA metadata reading.
///
/// # Examples
/// ```
/// use byteseq_core::formats::tga::TgaError;
///
/// let err = TgaError::UnsupportedImageType { value: 7 };
/// assert!(err.to_string().contains("unsupported image type"));
/// ```
#[derive(Debug, Error)]
pub enum TgaError {
    #[error("read error: {0}")]
    Read(#[from] ReadError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported image type: {value}")]
    UnsupportedImageType { value: u8 },
    #[error("invalid color map type: {value}")]
    InvalidColorMapType { value: u8 },
    #[error("invalid extension area size: {size}")]
    InvalidExtensionSize { size: u16 },
    #[error("developer tag {tag}: payload unreadable: {source}")]
    Payload { tag: u16, source: ReadError },
}
