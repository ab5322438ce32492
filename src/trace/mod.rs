use crate::condition::{DataType, Operator};

mod formatter;

pub use formatter::TraceFormatter;

/// One side of a condition: the template as configured and the text it rendered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub template: String,
    pub rendered: String,
}

/// How a single condition ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    /// The condition could not be decided (bad coercion, bad pattern, disallowed
    /// operator) and counts as failed.
    Invalid(String),
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed {
            Outcome::Passed
        } else {
            Outcome::Failed
        }
    }
}

/// A record of how one condition or rule was evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionTrace {
    pub data_type: DataType,
    pub operator: Operator,
    pub left: Operand,
    /// `None` for unary operators, which never look at the second value.
    pub right: Option<Operand>,
    pub outcome: Outcome,
}

impl ConditionTrace {
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}
