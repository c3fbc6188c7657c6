//! Typed decoding on top of byte sources.
//!
//! Each part follows the same split as the format modules:
//! - `layout`: widths and constants of the encodings
//! - `order`: byte-order combination rules (the only place bytes become numbers)
//! - `charset`: text decoding
//! - `sequential` / `random_access`: the two decoder surfaces
//!
//! Decoders never log and never add context to errors; a failed call reports
//! only whether data ran out or the source failed.

pub mod charset;
pub mod layout;
pub mod order;
pub mod random_access;
pub mod sequential;

pub use charset::{Charset, StringValue};
pub use order::ByteOrder;
pub use random_access::RandomAccessReader;
pub use sequential::SequentialReader;
