use std::borrow::Cow;
use std::collections::BTreeMap;

pub const YES: &str = "yes";
pub const NO: &str = "no";

/// The string token a boolean answer compares equal to.
///
/// This is the only place where `true`/`false` meet `"yes"`/`"no"`:
/// `true` ↔ `"yes"`, `false` ↔ `"no"`. Storage keeps the native type.
pub fn bool_token(value: bool) -> &'static str {
    if value { YES } else { NO }
}

/// A single answer, typed by the declaring question rather than by the
/// shape of the submitted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Scalar form used for comparisons. Booleans become their yes/no
    /// token; lists have no scalar form.
    pub fn as_scalar(&self) -> Option<Cow<'_, str>> {
        match self {
            AnswerValue::Bool(b) => Some(Cow::Borrowed(bool_token(*b))),
            AnswerValue::Text(s) => Some(Cow::Borrowed(s)),
            AnswerValue::List(_) => None,
        }
    }

    /// True for `Bool(true)` and for the text `"yes"`.
    pub fn is_affirmative(&self) -> bool {
        self.as_scalar().is_some_and(|s| s == YES)
    }
}

/// Answers of one submission, plus the derived texts computed from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    values: BTreeMap<String, AnswerValue>,
    derived: BTreeMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: AnswerValue) {
        self.values.insert(id.into(), value);
    }

    /// Attach the text of a derived question. Consumes the set so the
    /// augmented answers are handed on as a finished value.
    pub fn with_derived(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.derived.insert(id.into(), text.into());
        self
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.values.get(id)
    }

    pub fn derived(&self, id: &str) -> Option<&str> {
        self.derived.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, AnswerValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
            derived: BTreeMap::new(),
        }
    }
}
