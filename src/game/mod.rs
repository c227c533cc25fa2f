pub mod door;
pub mod board;

pub use board::{Board, Outcome, MIN_DOORS};
pub use door::Door;
