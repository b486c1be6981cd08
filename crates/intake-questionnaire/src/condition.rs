use intake_core::config::Charset;
use intake_core::models::answer::{bool_token, AnswerSet, AnswerValue};
use intake_gdt::charset::transliterate;

use crate::schema::{Condition, ConditionOp, Operand};

/// Whether `condition` holds for `answers`.
///
/// No condition, or one without an `id`, always holds. A condition on a
/// question that has no answer never holds, whatever its operator.
pub fn evaluate(answers: &AnswerSet, condition: Option<&Condition>) -> bool {
    let Some(condition) = condition else {
        return true;
    };
    let Some(id) = condition.id.as_deref() else {
        return true;
    };
    let Some(answer) = answers.get(id) else {
        return false;
    };

    match &condition.op {
        ConditionOp::Equals(expected) => answer
            .as_scalar()
            .is_some_and(|actual| actual == operand_text(expected)),
        ConditionOp::NotEquals(expected) => answer
            .as_scalar()
            .is_none_or(|actual| actual != operand_text(expected)),
        ConditionOp::In(allowed) => {
            let Some(actual) = answer.as_scalar() else {
                return false;
            };
            let actual = normalize(&actual);
            allowed.iter().any(|candidate| normalize(candidate) == actual)
        }
        ConditionOp::AnySelectedExcept(exception) => any_selected_except(answer, exception),
    }
}

fn any_selected_except(answer: &AnswerValue, exception: &str) -> bool {
    let Some(selected) = answer.as_list() else {
        return false;
    };
    let exception = normalize(exception);
    selected
        .iter()
        .map(|s| normalize(s))
        .any(|entry| !entry.is_empty() && entry != exception)
}

fn operand_text(operand: &Operand) -> &str {
    match operand {
        Operand::Bool(b) => bool_token(*b),
        Operand::Text(s) => s,
    }
}

/// Comparison form of free text: transliterated and trimmed.
fn normalize(text: &str) -> Vec<u8> {
    transliterate(text, Charset::Ascii)
}
