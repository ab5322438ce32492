pub mod engine;
pub mod node;

pub use engine::*;
pub use node::*;
