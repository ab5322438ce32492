use crate::condition::{Condition, ConditionEvaluator};
use crate::error::ConfigError;
use crate::trace::{ConditionTrace, TraceFormatter};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How the conditions of an If-node are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Combine {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl fmt::Display for Combine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combine::And => write!(f, "AND"),
            Combine::Or => write!(f, "OR"),
        }
    }
}

/// The conditions of an If-node. Must hold at least one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSet {
    pub conditions: Vec<Condition>,
    #[serde(default, alias = "combineOperation")]
    pub combine: Combine,
}

/// The result of evaluating an If-node.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSetOutcome {
    pub passed: bool,
    /// One trace per condition, in configuration order.
    pub traces: Vec<ConditionTrace>,
    /// A human-readable explanation of the conditions that decided the result.
    pub reason: String,
}

impl ConditionSet {
    /// Creates a set, rejecting an empty list of conditions.
    pub fn new(conditions: Vec<Condition>, combine: Combine) -> Result<Self, ConfigError> {
        let set = Self {
            conditions,
            combine,
        };
        set.check_structure()?;
        Ok(set)
    }

    /// The structural check performed before every evaluation.
    pub fn check_structure(&self) -> Result<(), ConfigError> {
        if self.conditions.is_empty() {
            return Err(ConfigError::EmptyConditionSet);
        }
        Ok(())
    }

    /// Full save-time validation: structure plus operator availability per condition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_structure()?;
        self.conditions
            .iter()
            .enumerate()
            .try_for_each(|(index, condition)| condition.validate(index))
    }

    /// Evaluates every condition independently and combines the results.
    pub fn evaluate(
        &self,
        evaluator: &ConditionEvaluator<'_>,
    ) -> Result<ConditionSetOutcome, ConfigError> {
        self.check_structure()?;

        let traces: Vec<ConditionTrace> = self
            .conditions
            .iter()
            .map(|condition| evaluator.evaluate(condition))
            .collect();

        let passed = match self.combine {
            Combine::And => traces.iter().all(ConditionTrace::passed),
            Combine::Or => traces.iter().any(ConditionTrace::passed),
        };
        let separator = format!(" {} ", self.combine);
        let reason = TraceFormatter::format_decisive(&traces, passed, &separator);
        debug!(combine = %self.combine, passed, "If-node evaluated");

        Ok(ConditionSetOutcome {
            passed,
            traces,
            reason,
        })
    }
}
