use crate::condition::{ConditionEvaluator, DataType, Operator, RULE_OPERATORS};
use crate::error::ConfigError;
use crate::trace::{ConditionTrace, TraceFormatter};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One routing rule of a Switch-node. Values are always compared as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default, alias = "valueTemplate")]
    pub value: String,
    pub operator: Operator,
    #[serde(default, alias = "value2Template")]
    pub value2: String,
    pub output_name: String,
}

impl Rule {
    pub fn new(
        value: impl Into<String>,
        operator: Operator,
        value2: impl Into<String>,
        output_name: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            operator,
            value2: value2.into(),
            output_name: output_name.into(),
        }
    }

    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !RULE_OPERATORS.contains(&self.operator) {
            return Err(ConfigError::RuleOperatorNotAllowed {
                index,
                operator: self.operator,
            });
        }
        if self.output_name.trim().is_empty() {
            return Err(ConfigError::EmptyOutputName { index });
        }
        Ok(())
    }

    pub fn evaluate(&self, evaluator: &ConditionEvaluator<'_>) -> ConditionTrace {
        evaluator.evaluate_parts(
            DataType::String,
            &self.value,
            self.operator,
            &self.value2,
            RULE_OPERATORS,
        )
    }
}

/// The ordered rules of a Switch-node. Order is significant and never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub rules: Vec<Rule>,
    #[serde(alias = "fallbackOutput")]
    pub fallback_output_name: String,
}

/// Which output a Switch-node routes to, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingDecision {
    pub output_name: String,
    /// Index of the winning rule; `None` when the fallback was taken.
    pub matched_rule: Option<usize>,
    /// Traces of the rules evaluated, up to and including the winner.
    pub traces: Vec<ConditionTrace>,
    pub reason: String,
}

impl RuleSet {
    /// Creates a rule set, rejecting an empty list of rules.
    pub fn new(
        rules: Vec<Rule>,
        fallback_output_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let set = Self {
            rules,
            fallback_output_name: fallback_output_name.into(),
        };
        set.check_structure()?;
        Ok(set)
    }

    pub fn check_structure(&self) -> Result<(), ConfigError> {
        if self.rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }
        Ok(())
    }

    /// Full save-time validation of every rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_structure()?;
        self.rules
            .iter()
            .enumerate()
            .try_for_each(|(index, rule)| rule.validate(index))
    }

    /// Returns the output of the first rule that matches, or the fallback.
    pub fn route(
        &self,
        evaluator: &ConditionEvaluator<'_>,
    ) -> Result<RoutingDecision, ConfigError> {
        self.check_structure()?;

        let mut traces = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            let trace = rule.evaluate(evaluator);
            let passed = trace.passed();
            traces.push(trace);
            if passed {
                debug!(rule = index, output = %rule.output_name, "Switch-node rule matched");
                let reason = format!(
                    "rule {} -> '{}': {}",
                    index,
                    rule.output_name,
                    TraceFormatter::format_condition(&traces[index])
                );
                return Ok(RoutingDecision {
                    output_name: rule.output_name.clone(),
                    matched_rule: Some(index),
                    traces,
                    reason,
                });
            }
        }

        debug!(output = %self.fallback_output_name, "No Switch-node rule matched; using fallback");
        Ok(RoutingDecision {
            output_name: self.fallback_output_name.clone(),
            matched_rule: None,
            traces,
            reason: format!("no rule matched -> fallback '{}'", self.fallback_output_name),
        })
    }
}
