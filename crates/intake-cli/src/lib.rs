//! intake-cli
//!
//! The `intake` binary: decode request records and write answer records
//! from a schema and an answer file.

pub mod cli;
pub mod commands;
pub mod config;
