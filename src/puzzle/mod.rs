//! Sudoku problem definition and solution handling

pub mod problem;
pub mod solution;

pub use problem::SudokuProblem;
pub use solution::{Solution, SolutionMetadata};
