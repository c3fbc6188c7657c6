use std::fmt;

use serde::{Deserialize, Serialize};

/// Text encodings understood by the string decoders.
///
/// Decoding never fails: malformed input yields U+FFFD for the offending
/// units, so a bad string cannot turn into a third error kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    #[default]
    Utf8,
    Ascii,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
    Utf16Be,
    Utf16Le,
}

impl Charset {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Charset::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Charset::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            Charset::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| unit([pair[0], pair[1]]));
    let mut text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

/// Raw bytes of a decoded string together with the encoding they were read with.
///
/// Keeps the original bytes available for callers that need to re-decode or
/// compare them exactly; `Display` renders the decoded text.
///
/// # Examples
/// ```
/// use byteseq_core::{Charset, StringValue};
///
/// let value = StringValue::new(vec![0x63, 0x61, 0x66, 0xE9], Charset::Latin1);
/// assert_eq!(value.to_string(), "café");
/// assert_eq!(value.bytes().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringValue {
    bytes: Vec<u8>,
    charset: Charset,
}

impl StringValue {
    pub fn new(bytes: Vec<u8>, charset: Charset) -> Self {
        Self { bytes, charset }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the bytes with a different encoding than the one recorded.
    pub fn decode_as(&self, charset: Charset) -> String {
        charset.decode(&self.bytes)
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.charset.decode(&self.bytes))
    }
}
