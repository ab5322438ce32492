use crate::condition::{DataType, Operator};
use thiserror::Error;

/// Errors raised while parsing a variable path such as `Node.items[2].name`.
///
/// These never reach the caller of the resolver or the template engine: a path that
/// fails to parse simply does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Variable path is empty")]
    Empty,

    #[error("Variable path '{path}' contains an empty segment")]
    EmptySegment { path: String },

    #[error("Segment '{segment}' has an index but no key before it")]
    MissingKey { segment: String },

    #[error("Segment '{segment}' has a malformed index: expected [<integer>]")]
    MalformedIndex { segment: String },
}

/// Errors raised when a rendered string cannot be interpreted as a condition's data type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("'{raw}' is not a number")]
    NotANumber { raw: String },

    #[error("'{raw}' is not a date/time")]
    NotADateTime { raw: String },

    #[error("'{raw}' is not valid JSON for type {expected}")]
    NotJson { raw: String, expected: DataType },

    #[error("'{raw}' is not a non-negative integer length")]
    NotALength { raw: String },

    #[error("Invalid regular expression '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// Structural configuration errors. These are the only failures surfaced to callers of
/// the routers, and they are raised before anything is evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("An If-node needs at least one condition")]
    EmptyConditionSet,

    #[error("A Switch-node needs at least one rule")]
    EmptyRuleSet,

    #[error("Condition {index}: operator '{operator}' is not available for type {data_type}")]
    OperatorNotAllowed {
        index: usize,
        operator: Operator,
        data_type: DataType,
    },

    #[error("Rule {index}: operator '{operator}' is not available for Switch-node rules")]
    RuleOperatorNotAllowed { index: usize, operator: Operator },

    #[error("Rule {index} has an empty output name")]
    EmptyOutputName { index: usize },

    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("Unknown data type '{0}'")]
    UnknownDataType(String),
}

/// Errors that can occur while loading contexts or configuration from JSON.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input context must be a JSON object keyed by node name, found {0}")]
    ContextNotAnObject(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub(crate) fn read_file(path: &str) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })
}
