//! intake-questionnaire
//!
//! Questionnaire definitions and their evaluation. Pure data, no I/O.
//! A [`schema::Schema`] is loaded and validated once, raw submissions are
//! turned into a typed [`AnswerSet`](intake_core::models::answer::AnswerSet),
//! and [`flatten::flatten`] reduces the answers to report blocks.

pub mod answers;
pub mod condition;
pub mod derived;
pub mod error;
pub mod flatten;
pub mod schema;
