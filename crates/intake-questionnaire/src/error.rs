use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema YAML is invalid: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("section #{index} has an empty title")]
    EmptySectionTitle { index: usize },

    #[error("a question in section '{section}' has no id")]
    MissingQuestionId { section: String },

    #[error("question '{id}' has no label")]
    MissingLabel { id: String },

    #[error("question id '{0}' is used more than once")]
    DuplicateQuestionId(String),

    #[error("derived question '{id}' has no formula")]
    MissingFormula { id: String },

    #[error("only one derived question is supported, found '{first}' and '{second}'")]
    MultipleDerived { first: String, second: String },
}

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("no questionnaire schema available: {0}")]
    SchemaUnavailable(String),
}
