mod board;
mod engine;

pub use board::{Board, BoardError};
pub use engine::{solve, step, Grid, StepOutcome};
