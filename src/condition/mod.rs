pub mod coercion;
pub mod evaluator;
pub mod operator;

pub use evaluator::*;
pub use operator::*;
