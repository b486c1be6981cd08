pub mod answer;
pub mod field;
