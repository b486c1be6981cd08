//! intake-export
//!
//! Section blocks → text-block lines, and the outbound answer record
//! composed around them.

pub mod error;
pub mod render;
pub mod response;
