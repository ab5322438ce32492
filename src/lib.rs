//! # Switchyard - Variable Templates and Typed Routing for Workflow Nodes
//!
//! **Switchyard** is the evaluation core behind workflow node configuration. It turns
//! template strings such as `Hi {{NodeA.items[2].user.name}}!` into concrete text using
//! the outputs of upstream nodes, and decides where a node routes: If-nodes combine typed
//! conditions with AND/OR, Switch-nodes pick the first matching rule.
//!
//! ## Core Workflow
//!
//! 1.  **Build a context**: The execution engine collects every upstream node output into
//!     an `InputContext`, keyed by node name.
//! 2.  **Load node configuration**: `Condition`, `ConditionSet`, `Rule` and `RuleSet`
//!     deserialize from the camelCase JSON the configuration UI produces.
//! 3.  **Evaluate**: An `Engine` (or the free functions below, which use a default one)
//!     resolves paths, renders templates, and routes nodes.
//!
//! Everything is synchronous and free of shared mutable state. Data problems (missing
//! paths, values that do not coerce, invalid patterns) never surface as errors: they make
//! a path missing or a condition false. Only structurally broken configuration, such as
//! an If-node with no conditions, is rejected with a `ConfigError`.
//!
//! ## Quick Start
//!
//! ```rust
//! use switchyard::prelude::*;
//! use serde_json::json;
//!
//! let ctx = InputContext::new().with_node("A", json!({"user": {"name": "Tom"}}));
//!
//! assert_eq!(switchyard::substitute("Hi {{A.user.name}}!", &ctx), "Hi Tom!");
//! assert_eq!(switchyard::substitute("{{A.missing}}", &ctx), "{{A.missing}}");
//!
//! let rules = RuleSet::new(
//!     vec![
//!         Rule::new("{{A.user.name}}", Operator::Equal, "Tom", "R1"),
//!         Rule::new("{{A.user.name}}", Operator::Exists, "", "R2"),
//!     ],
//!     "fallback",
//! )?;
//! assert_eq!(switchyard::evaluate_rule_set(&rules, &ctx)?, "R1");
//! # Ok::<(), switchyard::error::ConfigError>(())
//! ```

pub mod builtins;
pub mod condition;
pub mod config;
pub mod engine;
pub mod error;
pub mod path;
pub mod prelude;
pub mod router;
pub mod template;
pub mod trace;
pub mod value;

pub use engine::{Engine, EngineBuilder};

use condition::Condition;
use error::ConfigError;
use path::ResolutionResult;
use router::{ConditionSet, RuleSet};
use std::sync::LazyLock;
use template::{RenderMode, RenderedOutput};
use value::InputContext;

static DEFAULT_ENGINE: LazyLock<Engine> = LazyLock::new(Engine::new);

/// The engine used by the crate-level functions: default configuration, `now` built-in.
pub fn default_engine() -> &'static Engine {
    &DEFAULT_ENGINE
}

/// Resolves a variable path such as `NodeA.items[0].name`.
pub fn resolve_path(path: &str, ctx: &InputContext) -> ResolutionResult {
    DEFAULT_ENGINE.resolve_path(path, ctx)
}

pub fn render_template(text: &str, ctx: &InputContext, mode: RenderMode) -> RenderedOutput {
    DEFAULT_ENGINE.render_template(text, ctx, mode)
}

/// Substitutes every resolvable `{{path}}` token; unresolved tokens are kept verbatim.
pub fn substitute(text: &str, ctx: &InputContext) -> String {
    DEFAULT_ENGINE.substitute(text, ctx)
}

pub fn evaluate_condition(condition: &Condition, ctx: &InputContext) -> bool {
    DEFAULT_ENGINE.evaluate_condition(condition, ctx)
}

/// Evaluates an If-node. Fails if the set holds no conditions.
pub fn evaluate_condition_set(set: &ConditionSet, ctx: &InputContext) -> Result<bool, ConfigError> {
    DEFAULT_ENGINE.evaluate_condition_set(set, ctx)
}

/// Routes a Switch-node to an output name. Fails if the set holds no rules.
pub fn evaluate_rule_set(set: &RuleSet, ctx: &InputContext) -> Result<String, ConfigError> {
    DEFAULT_ENGINE.evaluate_rule_set(set, ctx)
}
