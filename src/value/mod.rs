pub mod context;
pub mod model;

pub use context::*;
pub use model::*;
