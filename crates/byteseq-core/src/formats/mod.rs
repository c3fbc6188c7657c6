//! File-format readers built on the decoders.
//!
//! Each format follows a layered structure:
//! - `layout`: byte offsets, widths and magic values
//! - `reader`: format conventions over a [`SequentialReader`](crate::SequentialReader)
//! - `parser`: domain-level decoding into typed structures
//! - `error`: explicit, actionable errors

pub mod tga;
