//! Answers → report blocks, one per section with something to say.

use intake_core::models::answer::{AnswerSet, AnswerValue};
use intake_gdt::charset::clean_text;
use tracing::info;

use crate::answers::{MAX_OPTION_CHARS, MAX_TEXT_CHARS};
use crate::condition::evaluate;
use crate::error::{FlattenError, SchemaError};
use crate::schema::{Question, QuestionKind, Schema, Section, SectionKind};

/// Longest kept section title, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// The reportable content of one section. `bullets` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    pub title: String,
    pub bullets: Vec<String>,
}

/// Flatten `answers` into section blocks, in schema order.
///
/// `schema` is the outcome of loading the questionnaire. A failed load is
/// reported as [`FlattenError::SchemaUnavailable`] so callers can tell
/// "nothing to report" (an empty list) from "could not evaluate".
pub fn flatten(
    schema: Result<&Schema, &SchemaError>,
    answers: &AnswerSet,
) -> Result<Vec<SectionBlock>, FlattenError> {
    let schema = schema.map_err(|e| FlattenError::SchemaUnavailable(e.to_string()))?;

    let blocks: Vec<SectionBlock> = schema
        .sections
        .iter()
        .filter_map(|section| {
            let bullets = section_bullets(schema, section, answers);
            (!bullets.is_empty()).then(|| SectionBlock {
                title: clean_text(&section.title, MAX_TITLE_CHARS),
                bullets,
            })
        })
        .collect();

    info!(
        sections = schema.sections.len(),
        blocks = blocks.len(),
        "questionnaire flattened"
    );
    Ok(blocks)
}

/// Bullets contributed by one section; empty when the section is hidden.
pub fn section_bullets(schema: &Schema, section: &Section, answers: &AnswerSet) -> Vec<String> {
    if !evaluate(answers, section.show_if.as_ref()) {
        return Vec::new();
    }

    let questions = section
        .questions
        .iter()
        .filter(|q| q.kind != QuestionKind::Header);

    if section.kind == SectionKind::Checklist {
        return questions
            .filter(|q| answers.get(&q.id).and_then(|v| v.as_bool()) == Some(true))
            .map(|q| q.label.clone())
            .collect();
    }

    let mut bullets = Vec::new();
    for question in questions {
        if !evaluate(answers, question.show_if.as_ref()) {
            continue;
        }
        question_bullets(schema, question, answers, &mut bullets);
    }
    bullets
}

fn question_bullets(
    schema: &Schema,
    question: &Question,
    answers: &AnswerSet,
    bullets: &mut Vec<String>,
) {
    let label = &question.label;
    let answer = answers.get(&question.id);

    match question.kind {
        QuestionKind::Yesno => {
            if answer.is_some_and(|a| a.is_affirmative()) {
                bullets.push(label.clone());
            }
        }
        QuestionKind::Multiselect => {
            let Some(selected) = answer.and_then(|a| a.as_list()) else {
                return;
            };
            let bare = schema.is_bare_option(&question.id);
            for option in selected {
                let option = clean_text(option, MAX_OPTION_CHARS);
                if option.is_empty() {
                    continue;
                }
                bullets.push(if bare {
                    option
                } else {
                    format!("{label}: {option}")
                });
            }
        }
        QuestionKind::Choice => {
            let value = clean_text(answer_text(answer), MAX_OPTION_CHARS);
            if !value.is_empty() && !schema.is_quiet_choice(&value) {
                bullets.push(format!("{label}: {value}"));
            }
        }
        QuestionKind::Number | QuestionKind::Text => {
            let value = clean_text(answer_text(answer), MAX_TEXT_CHARS);
            if !value.is_empty() {
                bullets.push(format!("{label}: {value}"));
            }
        }
        QuestionKind::Derived => {
            let text = clean_text(answers.derived(&question.id).unwrap_or(""), MAX_OPTION_CHARS);
            if !text.is_empty() {
                bullets.push(text);
            }
        }
        QuestionKind::Header => {}
    }
}

fn answer_text(answer: Option<&AnswerValue>) -> &str {
    answer.and_then(|a| a.as_text()).unwrap_or("")
}
