use super::{ConditionTrace, Operand, Outcome};
use itertools::Itertools;

/// Formats evaluation traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a single condition, e.g. `{{A.user.name}} (was "Tom") equal "Tom"`.
    pub fn format_condition(trace: &ConditionTrace) -> String {
        let mut result = Self::format_operand(&trace.left);
        result.push(' ');
        result.push_str(trace.operator.as_str());
        if let Some(right) = &trace.right {
            result.push(' ');
            result.push_str(&Self::format_operand(right));
        }
        if let Outcome::Invalid(reason) = &trace.outcome {
            result.push_str(&format!(" [invalid: {}]", reason));
        }
        result
    }

    /// Format the conditions that decided a combined result, joined by `separator`.
    ///
    /// Only the deciding conditions are shown: the passing ones for a true result, the
    /// failing ones for a false result.
    pub fn format_decisive(traces: &[ConditionTrace], passed: bool, separator: &str) -> String {
        traces
            .iter()
            .filter(|t| t.passed() == passed)
            .map(Self::format_condition)
            .join(separator)
    }

    /// Operands that came from a template show both the template and what it rendered to.
    fn format_operand(operand: &Operand) -> String {
        if operand.template == operand.rendered {
            format!("{:?}", operand.rendered)
        } else {
            format!("{} (was {:?})", operand.template, operand.rendered)
        }
    }
}
