pub mod render;
pub mod scanner;

pub use render::*;
pub use scanner::{Piece, scan, variables};
