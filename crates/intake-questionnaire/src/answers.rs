//! Raw submission → typed [`AnswerSet`].

use intake_core::models::answer::{AnswerSet, AnswerValue, YES};
use intake_gdt::charset::clean_text;
use serde_json::Value;
use tracing::{info, warn};

use crate::schema::{QuestionKind, Schema, SectionKind};

/// Longest kept option value, in characters.
pub const MAX_OPTION_CHARS: usize = 200;

/// Longest kept free-text answer, in characters.
pub const MAX_TEXT_CHARS: usize = 600;

/// Build the answer set for `schema` from a raw submission object
/// (`{"question_id": value, ...}`), then attach the derived value.
///
/// The answer type comes from the declaring question, not from the shape of
/// the submitted value. Questions missing from the submission are answered
/// with their empty value; ids the schema does not know are ignored.
pub fn ingest(schema: &Schema, raw: &Value) -> AnswerSet {
    let empty = serde_json::Map::new();
    let submitted = match raw {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            warn!(kind = json_kind(other), "submission is not an object, treating as empty");
            &empty
        }
    };

    let mut answers = AnswerSet::new();
    for (section, question) in schema.questions() {
        let value = submitted.get(&question.id).unwrap_or(&Value::Null);

        let answer = if section.kind == SectionKind::Checklist {
            AnswerValue::Bool(is_truthy(value))
        } else {
            match question.kind {
                QuestionKind::Yesno => AnswerValue::Bool(scalar_text(value) == YES),
                QuestionKind::Multiselect => AnswerValue::List(selected_options(value)),
                QuestionKind::Choice | QuestionKind::Number | QuestionKind::Text => {
                    AnswerValue::Text(clean_text(&scalar_text(value), MAX_TEXT_CHARS))
                }
                QuestionKind::Derived | QuestionKind::Header => continue,
            }
        };
        answers.insert(question.id.clone(), answer);
    }

    let answers = match schema.derived_question() {
        Some((question, formula)) => {
            let text = formula.compute(&answers);
            answers.with_derived(question.id.clone(), text)
        }
        None => answers,
    };

    info!(answers = answers.len(), "submission ingested");
    answers
}

/// Tick-box semantics: missing, `false`, `null`, `""`, `"0"`, `0` and empty
/// lists are unticked; anything else is ticked.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn selected_options(value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| clean_text(&scalar_text(item), MAX_OPTION_CHARS))
        .filter(|option| !option.is_empty())
        .collect()
}

/// Text form of a scalar submission value; structures read as empty.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => YES.to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
