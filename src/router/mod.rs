//! If-node and Switch-node routing built on the condition evaluator.

pub mod condition_set;
pub mod rule_set;

pub use condition_set::*;
pub use rule_set::*;
