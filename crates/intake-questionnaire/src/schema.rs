use std::collections::HashSet;

use serde::Deserialize;

use crate::derived::Formula;
use crate::error::SchemaError;

/// A questionnaire: ordered sections plus the reporting policy shared by
/// all of them.
#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub title: Option<String>,
    pub sections: Vec<Section>,
    /// Choice values that mean "nothing notable" and are never reported.
    #[serde(default)]
    pub quiet_choices: Vec<String>,
    /// Multiselect questions whose options are reported without the label.
    #[serde(default)]
    pub bare_option_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
    #[serde(default)]
    pub show_if: Option<Condition>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    /// Every question is a tick box; ticked labels are reported.
    Checklist,
    #[default]
    #[serde(alias = "form")]
    FreeForm,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub show_if: Option<Condition>,
    /// Only for [`QuestionKind::Derived`].
    #[serde(default)]
    pub formula: Option<Formula>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Yesno,
    Choice,
    Multiselect,
    Number,
    Text,
    Derived,
    /// Display-only; never answered, never reported.
    Header,
}

/// A show/hide rule referencing one other question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawCondition")]
pub struct Condition {
    /// `None` means the condition always holds.
    pub id: Option<String>,
    pub op: ConditionOp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionOp {
    Equals(Operand),
    NotEquals(Operand),
    In(Vec<String>),
    /// The answer is a list holding at least one entry other than this one.
    /// An empty exception accepts any non-empty selection.
    AnySelectedExcept(String),
}

/// Right-hand side of `equals`/`not_equals`. Schemas may write either
/// `true` or `"yes"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Bool(bool),
    Text(String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCondition {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    equals: Option<Operand>,
    #[serde(default)]
    not_equals: Option<Operand>,
    #[serde(default, rename = "in")]
    in_list: Option<Vec<String>>,
    #[serde(default)]
    any_selected_except: Option<String>,
}

impl TryFrom<RawCondition> for Condition {
    type Error = String;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        let mut ops = Vec::new();
        if let Some(v) = raw.equals {
            ops.push(ConditionOp::Equals(v));
        }
        if let Some(v) = raw.not_equals {
            ops.push(ConditionOp::NotEquals(v));
        }
        if let Some(v) = raw.in_list {
            ops.push(ConditionOp::In(v));
        }
        if let Some(v) = raw.any_selected_except {
            ops.push(ConditionOp::AnySelectedExcept(v));
        }

        let id = raw.id.filter(|id| !id.is_empty());
        let subject = id.as_deref().unwrap_or("<none>");
        if ops.len() > 1 {
            return Err(format!("condition on '{subject}' names more than one operator"));
        }
        let op = ops
            .pop()
            .ok_or_else(|| format!("condition on '{subject}' names no operator"))?;
        Ok(Condition { id, op })
    }
}

impl Schema {
    pub fn from_json_str(contents: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(contents)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_yaml::from_str(contents)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Structural checks serde cannot express.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        let mut derived: Option<&str> = None;

        for (index, section) in self.sections.iter().enumerate() {
            if section.title.trim().is_empty() {
                return Err(SchemaError::EmptySectionTitle { index });
            }
            for question in &section.questions {
                if question.kind == QuestionKind::Header {
                    continue;
                }
                if question.id.is_empty() {
                    return Err(SchemaError::MissingQuestionId {
                        section: section.title.clone(),
                    });
                }
                if question.label.trim().is_empty() {
                    return Err(SchemaError::MissingLabel {
                        id: question.id.clone(),
                    });
                }
                if !seen.insert(question.id.as_str()) {
                    return Err(SchemaError::DuplicateQuestionId(question.id.clone()));
                }
                if question.kind == QuestionKind::Derived {
                    if question.formula.is_none() {
                        return Err(SchemaError::MissingFormula {
                            id: question.id.clone(),
                        });
                    }
                    if let Some(first) = derived {
                        return Err(SchemaError::MultipleDerived {
                            first: first.to_string(),
                            second: question.id.clone(),
                        });
                    }
                    derived = Some(question.id.as_str());
                }
            }
        }
        Ok(())
    }

    /// All non-header questions in schema order.
    pub fn questions(&self) -> impl Iterator<Item = (&Section, &Question)> {
        self.sections.iter().flat_map(|s| {
            s.questions
                .iter()
                .filter(|q| q.kind != QuestionKind::Header)
                .map(move |q| (s, q))
        })
    }

    /// The derived question and its formula, if the schema has one.
    pub fn derived_question(&self) -> Option<(&Question, &Formula)> {
        self.questions()
            .filter(|(_, q)| q.kind == QuestionKind::Derived)
            .find_map(|(_, q)| q.formula.as_ref().map(|f| (q, f)))
    }

    pub fn is_quiet_choice(&self, value: &str) -> bool {
        self.quiet_choices.iter().any(|q| q == value)
    }

    pub fn is_bare_option(&self, id: &str) -> bool {
        self.bare_option_ids.iter().any(|b| b == id)
    }
}
