use crate::error::{LoadError, read_file};
use crate::router::{ConditionSet, RuleSet};
use serde::{Deserialize, Serialize};

/// Routing configuration of a node, tagged by node type.
///
/// ```json
/// { "type": "if", "combine": "OR", "conditions": [ ... ] }
/// { "type": "switch", "fallbackOutputName": "other", "rules": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeConfig {
    If(ConditionSet),
    Switch(RuleSet),
}

impl NodeConfig {
    /// Parses and validates a node configuration.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: NodeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a node configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        Self::from_json_str(&read_file(path)?)
    }

    pub fn validate(&self) -> Result<(), crate::error::ConfigError> {
        match self {
            NodeConfig::If(set) => set.validate(),
            NodeConfig::Switch(set) => set.validate(),
        }
    }
}
