//! Sudoku SAT Solver
//!
//! Encodes N×N Sudoku puzzles as CNF, hands them to a SAT solver and decodes
//! the returned model back into a completed grid.

pub mod config;
pub mod puzzle;
pub mod sat;
pub mod sudoku;
pub mod utils;

pub use config::Settings;
pub use puzzle::{Solution, SudokuProblem};
pub use sudoku::Grid;

use anyhow::Result;

/// Main entry point: solve the puzzle named in `settings`
pub fn solve_sudoku(settings: Settings) -> Result<Vec<Solution>> {
    let mut problem = SudokuProblem::new(settings)?;
    problem.solve()
}

/// Solve a grid given as rows of digit strings (`"1"..="N"`, blank or
/// whitespace for empty cells). `Ok(None)` means the puzzle has no solution.
pub fn solve_grid<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Option<Grid>> {
    let puzzle = Grid::from_strings(rows)?;
    let mut problem = SudokuProblem::with_puzzle(Settings::default(), puzzle)?;
    Ok(problem.solve()?.into_iter().next().map(|solution| solution.grid))
}
