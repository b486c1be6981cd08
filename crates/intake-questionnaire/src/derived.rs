//! Values computed from other answers rather than submitted.

use intake_core::models::answer::AnswerSet;
use serde::Deserialize;
use tracing::debug;

/// Cigarettes in one pack.
pub const CIGARETTES_PER_PACK: f64 = 20.0;

/// A derived-question formula. Tagged by `kind` in the schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formula {
    PackYears(PackYearsFormula),
}

impl Formula {
    /// The derived text for `answers`; empty when the inputs do not
    /// support a value.
    pub fn compute(&self, answers: &AnswerSet) -> String {
        match self {
            Formula::PackYears(f) => f.compute(answers),
        }
    }
}

/// Smoking exposure: packs per day times years smoked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackYearsFormula {
    /// Yes/no question: does the patient smoke.
    pub smoker: String,
    /// Cigarettes per day.
    pub per_day: String,
    /// Years smoked.
    pub years: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_prefix() -> String {
    "at least".to_string()
}

fn default_unit() -> String {
    "pack-years".to_string()
}

impl PackYearsFormula {
    pub fn compute(&self, answers: &AnswerSet) -> String {
        let is_smoker = answers
            .get(&self.smoker)
            .is_some_and(|v| v.is_affirmative());
        let text_of = |id: &str| answers.get(id).and_then(|v| v.as_text()).unwrap_or("");

        match pack_years(is_smoker, text_of(&self.per_day), text_of(&self.years)) {
            Some(index) => format!("{} {index} {}", self.prefix, self.unit),
            None => {
                debug!(smoker = is_smoker, "pack-years not derivable");
                String::new()
            }
        }
    }
}

/// `floor(per_day / 20 * years)`, at least 1 for any positive exposure.
///
/// `None` unless the patient smokes, both inputs parse as finite
/// positive numbers, and the index fits a `u64`.
pub fn pack_years(is_smoker: bool, per_day: &str, years: &str) -> Option<u64> {
    if !is_smoker {
        return None;
    }
    let per_day = parse_decimal(per_day).filter(|v| *v > 0.0)?;
    let years = parse_decimal(years).filter(|v| *v > 0.0)?;

    let exposure = per_day / CIGARETTES_PER_PACK * years;
    if !exposure.is_finite() || exposure <= 0.0 {
        return None;
    }
    let index = exposure.floor();
    // u64::MAX rounds up to 2^64 as f64, so this also rejects saturation.
    if index >= u64::MAX as f64 {
        debug!(exposure, "pack-years out of range");
        return None;
    }
    Some((index as u64).max(1))
}

/// Parse a number written with `,` or `.` as decimal separator.
///
/// Every character other than digits and the separator is dropped first
/// (`"20 Stück"` reads as `20`). Only the first separator counts.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .chars()
        .map(|c| if c == ',' { '.' } else { c })
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = cleaned.split('.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let normalized = format!(
        "{}.{}",
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
