//! byteseq core library: byte-order-aware binary decoding.
//!
//! The crate is layered the same way a format parser uses it:
//! sources supply bytes (`source`), decoders turn them into typed values
//! (`decode`), and format readers (`formats`) walk a concrete file layout with
//! those decoders. `inspect` assembles a deterministic report for one file.
//! All I/O is isolated in `source`; decoders are pure apart from the bytes
//! they pull.
//!
//! Invariants:
//! - A sequential decoder's cursor only moves forward, by exactly the bytes
//!   each call consumed (including bytes consumed before a failure).
//! - Byte order is decoder state; changing it only affects later calls.
//! - Decoders fail with exactly two kinds of error: end of sequence or source
//!   failure.
//!
//! # Examples
//! ```
//! use byteseq_core::{ByteOrder, SequentialReader, SliceSource};
//!
//! let data = [0xFF, 0x00, 0x02, 0x80, 0x00, b'h', b'i', 0x00];
//! let mut reader = SequentialReader::new(SliceSource::new(&data));
//! assert_eq!(reader.read_i8()?, -1);
//! assert_eq!(reader.read_s15_fixed16()?, 2.5);
//! assert_eq!(reader.read_null_terminated_string(8)?, "hi");
//! assert_eq!(reader.byte_order(), ByteOrder::BigEndian);
//! # Ok::<(), byteseq_core::ReadError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod decode;
pub mod formats;
mod inspect;
mod source;

pub use decode::{ByteOrder, Charset, RandomAccessReader, SequentialReader, StringValue};
pub use inspect::{InspectError, inspect_stream, inspect_tga_file};
pub use source::{
    ByteSource, RandomAccessSource, ReadError, SeekSource, SliceSource, StreamSource,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used until the caller stamps the report.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Metadata report for one input file.
///
/// # Examples
/// ```
/// use byteseq_core::make_stub_report;
///
/// let report = make_stub_report("image.tga", 123);
/// assert_eq!(report.report_version, byteseq_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,

    /// Input file metadata.
    pub input: InputInfo,

    /// Image header summary (absent only in stub reports).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSummary>,
    /// Extension area summary, when the file has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<ExtensionSummary>,
    /// Developer-area fields in ascending tag order.
    pub developer_fields: Vec<DeveloperField>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "byteseq").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input file metadata embedded in reports.
///
/// # Examples
/// ```
/// use byteseq_core::InputInfo;
///
/// let input = InputInfo {
///     path: "image.tga".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the inspector.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Image header summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSummary {
    /// Raw image type code.
    pub image_type: u8,
    /// Human-readable image type (e.g., "true-color").
    pub image_type_name: String,
    /// Whether the run-length encoded variant is used.
    pub rle: bool,
    pub width: u16,
    pub height: u16,
    /// Bits per pixel.
    pub pixel_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    /// Number of color-map entries (0 without a color map).
    pub color_map_length: u16,
    /// Image id text from the header, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
}

/// Extension area summary; unset fields are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    /// ISO 8601 date/time stamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    pub key_color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_aspect_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    pub attributes_type: u8,
}

/// One developer-area field.
///
/// # Examples
/// ```
/// use byteseq_core::DeveloperField;
///
/// let field = DeveloperField {
///     tag: 7,
///     size: 2,
///     data_hex: "beef".to_string(),
/// };
/// assert_eq!(field.size, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperField {
    /// Developer tag identifier.
    pub tag: u16,
    /// Payload size in bytes.
    pub size: u64,
    /// Payload as lowercase hex.
    pub data_hex: String,
}

/// Build a stub report with base fields filled and empty sections.
///
/// # Examples
/// ```
/// use byteseq_core::make_stub_report;
///
/// let report = make_stub_report("image.tga", 123);
/// assert_eq!(report.report_version, byteseq_core::REPORT_VERSION);
/// assert!(report.developer_fields.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "byteseq".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        image: None,
        extension: None,
        developer_fields: vec![],
    }
}
