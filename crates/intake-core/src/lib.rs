//! intake-core
//!
//! Shared vocabulary of the intake workspace: field codes, record fields,
//! typed questionnaire answers and the exchange configuration.
//! No I/O. Every other crate builds on these types.

pub mod config;
pub mod error;
pub mod fields;
pub mod models;
