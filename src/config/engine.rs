use crate::error::{LoadError, read_file};
use serde::{Deserialize, Serialize};

/// Tunables for an [`Engine`](crate::Engine). Every field has a default, so an empty
/// JSON object is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Upper bound, in bytes, on a compiled `regex`/`notRegex` pattern. Larger patterns
    /// are treated as invalid and the condition fails.
    pub regex_size_limit: usize,
    /// Upper bound, in bytes, on the lazy DFA cache used while matching.
    pub regex_dfa_size_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regex_size_limit: 1 << 20,
            regex_dfa_size_limit: 2 << 20,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        Self::from_json_str(&read_file(path)?)
    }
}
