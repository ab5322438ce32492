use crate::path::{PathSegment, VariablePath};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Largest integer an `f64` holds exactly; integral numbers below it render without a fraction.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A JSON-like value produced by an upstream node.
///
/// Values are immutable snapshots. Objects keep their keys sorted so that rendering the
/// same value twice always yields the same text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Short lowercase name of the value's kind, as used in log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Looks up a key when the value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Looks up an element when the value is an array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value counts as "empty": `null`, `""`, `[]` or `{}`.
    /// Numbers and booleans are never empty, including `0` and `false`.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    /// Text inserted in place of a template token: strings raw, everything else as JSON.
    pub fn to_template_text(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Converts to a `serde_json::Value` without consuming `self`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    /// Lists every leaf reachable from this value, with the full path that addresses it
    /// when this value is the output of node `root`.
    ///
    /// Empty arrays and objects are reported as leaves.
    pub fn leaf_paths(&self, root: &str) -> Vec<(VariablePath, &Value)> {
        let mut leaves = Vec::new();
        let mut segments = vec![PathSegment::Key(root.to_string())];
        self.collect_leaves(&mut segments, &mut leaves);
        leaves
    }

    fn collect_leaves<'a>(
        &'a self,
        segments: &mut Vec<PathSegment>,
        leaves: &mut Vec<(VariablePath, &'a Value)>,
    ) {
        match self {
            Value::Object(map) if !map.is_empty() => {
                for (key, child) in map {
                    segments.push(PathSegment::Key(key.clone()));
                    child.collect_leaves(segments, leaves);
                    segments.pop();
                }
            }
            Value::Array(items) if !items.is_empty() => {
                for (index, child) in items.iter().enumerate() {
                    segments.push(PathSegment::Index(index));
                    child.collect_leaves(segments, leaves);
                    segments.pop();
                }
            }
            leaf => {
                if let Some(path) = VariablePath::from_segments(segments.clone()) {
                    leaves.push((path, leaf));
                }
            }
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 {
        if n.abs() <= MAX_SAFE_INTEGER {
            return serde_json::Value::from(n as i64);
        }
        if let Some(wide) = wide_integer_to_json(n) {
            return wide;
        }
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

/// Integers beyond 2^53 keep their shortest round-trip digits padded with zeros, as
/// `JSON.stringify` prints them, e.g. `1234567890123456800`. Only 64-bit magnitudes fit.
fn wide_integer_to_json(n: f64) -> Option<serde_json::Value> {
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = scientific.split_once('e')?;
    let exponent: usize = exponent.parse().ok()?;
    let mut digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    if digits.len() > exponent + 1 {
        return None;
    }
    digits.extend(std::iter::repeat_n('0', exponent + 1 - digits.len()));
    let magnitude: u64 = digits.parse().ok()?;
    if n < 0.0 {
        0i64.checked_sub_unsigned(magnitude).map(serde_json::Value::from)
    } else {
        Some(serde_json::Value::from(magnitude))
    }
}

/// Renders canonical JSON text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        value.to_json()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
