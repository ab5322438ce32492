use super::coercion::{
    Coerced, coerce, is_empty_as, is_value_empty_as, parse_element, parse_flag, parse_length,
};
use super::{DataType, Operator};
use crate::config::EngineConfig;
use crate::error::{CoercionError, ConfigError};
use crate::template::{Substitution, TemplateRenderer};
use crate::trace::{ConditionTrace, Operand, Outcome};
use crate::value::Value;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// A single typed comparison, as configured on an If-node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub value1: String,
    pub operator: Operator,
    #[serde(default)]
    pub value2: String,
}

impl Condition {
    pub fn new(
        data_type: DataType,
        value1: impl Into<String>,
        operator: Operator,
        value2: impl Into<String>,
    ) -> Self {
        Self {
            data_type,
            value1: value1.into(),
            operator,
            value2: value2.into(),
        }
    }

    /// A condition whose operator ignores the second value.
    pub fn unary(data_type: DataType, value1: impl Into<String>, operator: Operator) -> Self {
        Self::new(data_type, value1, operator, "")
    }

    /// Checks that the operator is available for the declared data type.
    /// `index` is the condition's position, used in the error.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.data_type.allows(self.operator) {
            Ok(())
        } else {
            Err(ConfigError::OperatorNotAllowed {
                index,
                operator: self.operator,
                data_type: self.data_type,
            })
        }
    }
}

/// Evaluates conditions against one input context.
///
/// Every data-shape problem is absorbed into a `false` outcome; evaluation never fails.
#[derive(Debug, Clone, Copy)]
pub struct ConditionEvaluator<'a> {
    renderer: TemplateRenderer<'a>,
    config: &'a EngineConfig,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(renderer: TemplateRenderer<'a>, config: &'a EngineConfig) -> Self {
        Self { renderer, config }
    }

    pub fn evaluate(&self, condition: &Condition) -> ConditionTrace {
        self.evaluate_parts(
            condition.data_type,
            &condition.value1,
            condition.operator,
            &condition.value2,
            condition.data_type.operators(),
        )
    }

    /// Evaluates `value1 operator value2` as `data_type`, provided `operator` is one of
    /// `allowed`.
    pub fn evaluate_parts(
        &self,
        data_type: DataType,
        value1: &str,
        operator: Operator,
        value2: &str,
        allowed: &[Operator],
    ) -> ConditionTrace {
        let left = self.renderer.substitute(value1);
        let right = (!operator.is_unary()).then(|| self.renderer.substitute(value2));

        let outcome = if !allowed.contains(&operator) {
            warn!(%operator, %data_type, "Operator not available for this condition type");
            Outcome::Invalid(format!(
                "operator '{}' is not available for {}",
                operator, data_type
            ))
        } else {
            let decided = match &right {
                None => self.unary(data_type, operator, value1, &left),
                Some(right) => self.binary(data_type, operator, &left.text, &right.text),
            };
            match decided {
                Ok(passed) => Outcome::from(passed),
                Err(e) => {
                    debug!(%operator, %data_type, error = %e, "Condition could not be decided");
                    Outcome::Invalid(e.to_string())
                }
            }
        };

        ConditionTrace {
            data_type,
            operator,
            left: operand(value1, left),
            right: right.map(|r| operand(value2, r)),
            outcome,
        }
    }

    fn unary(
        &self,
        data_type: DataType,
        operator: Operator,
        template: &str,
        left: &Substitution,
    ) -> Result<bool, CoercionError> {
        // A template without tokens exists when it has any literal text.
        let exists = if left.tokens > 0 {
            left.fully_resolved()
        } else {
            !template.trim().is_empty()
        };

        // A lone token is judged on its value, so a `null` leaf is empty rather than "null".
        let empty = || match self.renderer.sole_value(template) {
            Some(value) => is_value_empty_as(&value, data_type),
            None => is_empty_as(&left.text, data_type),
        };

        match operator {
            Operator::Exists => Ok(exists),
            Operator::NotExists => Ok(!exists),
            Operator::IsEmpty => Ok(!exists || empty()?),
            Operator::IsNotEmpty => Ok(exists && !empty()?),
            Operator::True => Ok(exists && parse_flag(&left.text)),
            Operator::False => Ok(exists && !parse_flag(&left.text)),
            _ => Ok(false),
        }
    }

    fn binary(
        &self,
        data_type: DataType,
        operator: Operator,
        left: &str,
        right: &str,
    ) -> Result<bool, CoercionError> {
        use Operator::*;

        match operator {
            Equal | NotEqual => {
                let equal = coerce(left, data_type)? == coerce(right, data_type)?;
                Ok(equal == (operator == Equal))
            }
            Contains | NotContains => {
                let contained = match coerce(left, data_type)? {
                    Coerced::Json(Value::Array(items)) => {
                        items.contains(&parse_element(right))
                            || items.contains(&Value::String(right.to_string()))
                    }
                    _ => left.contains(right),
                };
                Ok(contained == (operator == Contains))
            }
            StartsWith => Ok(left.starts_with(right)),
            NotStartsWith => Ok(!left.starts_with(right)),
            EndsWith => Ok(left.ends_with(right)),
            NotEndsWith => Ok(!left.ends_with(right)),
            Regex | NotRegex => {
                let pattern = RegexBuilder::new(right)
                    .size_limit(self.config.regex_size_limit)
                    .dfa_size_limit(self.config.regex_dfa_size_limit)
                    .build()
                    .map_err(|e| CoercionError::InvalidRegex {
                        pattern: right.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(pattern.is_match(left) == (operator == Regex))
            }
            Gt | Lt | Gte | Lte | After | Before | AfterOrEqual | BeforeOrEqual => {
                let ordering = coerce(left, data_type)?.compare(&coerce(right, data_type)?);
                Ok(match (operator, ordering) {
                    (_, None) => false,
                    (Gt | After, Some(o)) => o == Ordering::Greater,
                    (Lt | Before, Some(o)) => o == Ordering::Less,
                    (Gte | AfterOrEqual, Some(o)) => o != Ordering::Less,
                    (_, Some(o)) => o != Ordering::Greater,
                })
            }
            LengthEqual | LengthNotEqual | LengthGt | LengthLt | LengthGte | LengthLte => {
                let len = match coerce(left, DataType::Array)? {
                    Coerced::Json(Value::Array(items)) => items.len(),
                    _ => return Ok(false),
                };
                let expected = parse_length(right)?;
                Ok(match operator {
                    LengthEqual => len == expected,
                    LengthNotEqual => len != expected,
                    LengthGt => len > expected,
                    LengthLt => len < expected,
                    LengthGte => len >= expected,
                    _ => len <= expected,
                })
            }
            Exists | NotExists | IsEmpty | IsNotEmpty | True | False => Ok(false),
        }
    }
}

fn operand(template: &str, substitution: Substitution) -> Operand {
    Operand {
        template: template.to_string(),
        rendered: substitution.text,
    }
}
