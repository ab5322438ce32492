//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the switchyard crate.
//!
//! # Example
//!
//! ```rust
//! use switchyard::prelude::*;
//! use serde_json::json;
//!
//! let engine = Engine::new();
//! let ctx = InputContext::new().with_node("Order", json!({"total": 120}));
//!
//! let set = ConditionSet::new(
//!     vec![Condition::new(DataType::Number, "{{Order.total}}", Operator::Gt, "100")],
//!     Combine::And,
//! )
//! .unwrap();
//! assert!(engine.evaluate_condition_set(&set, &ctx).unwrap());
//! ```

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// Values and paths
pub use crate::path::{PathSegment, ResolutionResult, VariablePath};
pub use crate::value::{InputContext, Value};

// Templates
pub use crate::template::{RenderMode, RenderedOutput, Span, SpanKind};

// Conditions and routing
pub use crate::condition::{Condition, DataType, Operator};
pub use crate::router::{Combine, ConditionSet, ConditionSetOutcome, RoutingDecision, Rule, RuleSet};

// Configuration
pub use crate::config::{EngineConfig, NodeConfig};

// Error types
pub use crate::error::{ConfigError, LoadError};

// Trace formatting
pub use crate::trace::{ConditionTrace, Outcome, TraceFormatter};
