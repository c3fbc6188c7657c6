//! Truevision TGA metadata.
//!
//! Reads the image header, the TGA 2.0 footer, the extension area and the
//! developer area. Pixel data is never touched. Wire offsets and widths live
//! in `layout`, TGA field conventions (little-endian, NUL-padded text, zero as
//! "unset") in `reader`, and the area decoders in `parser`.
//!
//! The developer area shows how the two decoder kinds compose: its tag table is
//! walked with a sequential reader, then every payload is fetched by absolute
//! offset through a random-access reader on the same stream.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::TgaError;
pub use parser::{
    DeveloperArea, TgaExtension, TgaFooter, TgaHeader, parse_header, read_developer_area,
    read_extension_area, read_footer,
};
pub use reader::DeveloperTag;
