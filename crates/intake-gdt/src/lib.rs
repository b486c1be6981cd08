//! intake-gdt
//!
//! The device-data-transfer wire format: charset transliteration,
//! byte-budget line wrapping and the length-prefixed record codec.
//! Pure functions over in-memory data.

pub mod charset;
pub mod codec;
pub mod error;
pub mod wrap;
