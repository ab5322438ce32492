use super::Value;
use crate::error::{LoadError, read_file};
use ahash::AHashMap;

/// Snapshot of every upstream node output visible to one evaluation, keyed by node name.
///
/// The execution engine builds a fresh context per evaluation; nothing in this crate
/// mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputContext {
    nodes: AHashMap<String, Value>,
}

impl InputContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the output of a node, returning the extended context.
    pub fn with_node(mut self, name: impl Into<String>, output: impl Into<Value>) -> Self {
        self.nodes.insert(name.into(), output.into());
        self
    }

    /// Returns the output of the named node.
    pub fn get(&self, node: &str) -> Option<&Value> {
        self.nodes.get(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node names in sorted order.
    pub fn node_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Builds a context from a JSON object whose keys are node names.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, LoadError> {
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(LoadError::ContextNotAnObject(
                Value::from(other).kind_name().to_string(),
            )),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Self::from_json_value(serde_json::from_str(json)?)
    }

    /// Load a context from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        Self::from_json_str(&read_file(path)?)
    }
}

impl<K, V> FromIterator<(K, V)> for InputContext
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            nodes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
