//! Sudoku grid model, puzzle I/O and rule checks

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::{Grid, GridError};
pub use io::{
    create_example_puzzles, load_puzzle_from_file, parse_puzzle_from_string, save_grid_to_file,
};
pub use rules::{House, SudokuRules, ValidationResult, Violation};
