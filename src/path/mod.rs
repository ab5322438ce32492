pub mod resolver;
pub mod segment;

pub use resolver::*;
pub use segment::*;
