//! Sudoku rule checks for decoded solutions and puzzle diagnostics

use super::Grid;
use rayon::prelude::*;
use std::fmt;

/// A group of cells that must hold each digit at most once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    Row(usize),
    Column(usize),
    Block(usize),
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            House::Row(i) => write!(f, "row {}", i),
            House::Column(i) => write!(f, "column {}", i),
            House::Block(i) => write!(f, "block {}", i),
        }
    }
}

/// A single broken rule found while checking a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Blank { row: usize, col: usize },
    Duplicate { house: House, digit: usize },
    ClueChanged { row: usize, col: usize, expected: usize, found: Option<usize> },
    SizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Blank { row, col } => write!(f, "cell ({}, {}) is blank", row, col),
            Violation::Duplicate { house, digit } => {
                write!(f, "digit {} appears more than once in {}", digit, house)
            }
            Violation::ClueChanged { row, col, expected, found } => match found {
                Some(found) => write!(
                    f,
                    "clue at ({}, {}) is {} but solution has {}",
                    row, col, expected, found
                ),
                None => write!(
                    f,
                    "clue at ({}, {}) is {} but solution cell is blank",
                    row, col, expected
                ),
            },
            Violation::SizeMismatch { expected, found } => {
                write!(f, "solution is {}x{} but puzzle is {}x{}", found, found, expected, expected)
            }
        }
    }
}

/// Result of checking a solution against a puzzle
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}

/// Sudoku rules engine
pub struct SudokuRules;

impl SudokuRules {
    /// All houses of a grid of side `size`
    pub fn houses(size: usize) -> Vec<House> {
        (0..size)
            .map(House::Row)
            .chain((0..size).map(House::Column))
            .chain((0..size).map(House::Block))
            .collect()
    }

    /// Cell coordinates covered by a house
    pub fn house_cells(grid: &Grid, house: House) -> Vec<(usize, usize)> {
        match house {
            House::Row(row) => (0..grid.size).map(|col| (row, col)).collect(),
            House::Column(col) => (0..grid.size).map(|row| (row, col)).collect(),
            House::Block(block) => grid.block_cells(block),
        }
    }

    /// Digits repeated within a house, ignoring blanks
    fn duplicates_in(grid: &Grid, house: House) -> Vec<usize> {
        let mut seen = vec![false; grid.size + 1];
        let mut repeated = Vec::new();
        for (row, col) in Self::house_cells(grid, house) {
            if let Some(digit) = grid.get(row, col) {
                if seen[digit] && !repeated.contains(&digit) {
                    repeated.push(digit);
                }
                seen[digit] = true;
            }
        }
        repeated
    }

    /// Check that `solution` is a complete, rule-abiding grid agreeing with
    /// every clue of `puzzle`
    pub fn check_solution(solution: &Grid, puzzle: &Grid) -> ValidationResult {
        if solution.size != puzzle.size {
            return ValidationResult {
                is_valid: false,
                violations: vec![Violation::SizeMismatch {
                    expected: puzzle.size,
                    found: solution.size,
                }],
            };
        }

        let mut violations = Vec::new();

        for row in 0..solution.size {
            for col in 0..solution.size {
                if solution.get(row, col).is_none() {
                    violations.push(Violation::Blank { row, col });
                }
            }
        }

        let duplicates: Vec<Violation> = Self::houses(solution.size)
            .into_par_iter()
            .flat_map_iter(|house| {
                Self::duplicates_in(solution, house)
                    .into_iter()
                    .map(move |digit| Violation::Duplicate { house, digit })
            })
            .collect();
        violations.extend(duplicates);

        for (row, col, expected) in puzzle.clues() {
            let found = solution.get(row, col);
            if found != Some(expected) {
                violations.push(Violation::ClueChanged { row, col, expected, found });
            }
        }

        ValidationResult {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    /// Houses in which the puzzle's own clues already repeat a digit.
    ///
    /// Diagnostic only: such puzzles are still encoded and come back UNSAT.
    pub fn conflicting_clues(puzzle: &Grid) -> Vec<(House, usize)> {
        Self::houses(puzzle.size)
            .into_iter()
            .flat_map(|house| {
                Self::duplicates_in(puzzle, house)
                    .into_iter()
                    .map(move |digit| (house, digit))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::parse_puzzle_from_string;

    fn puzzle() -> Grid {
        parse_puzzle_from_string("..1.\n.3.4\n3.4.\n.2..\n").unwrap()
    }

    #[test]
    fn test_valid_solution() {
        let solution = parse_puzzle_from_string("2413\n1324\n3142\n4231\n").unwrap();
        let result = SudokuRules::check_solution(&solution, &puzzle());
        assert!(result.is_valid, "{}", result);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_duplicate_detection() {
        // rows are fine, columns and blocks are not
        let solution = parse_puzzle_from_string("1234\n1234\n1234\n1234\n").unwrap();
        let result = SudokuRules::check_solution(&solution, &Grid::new(4).unwrap());
        assert!(!result.is_valid);
        assert!(result.violations.contains(&Violation::Duplicate {
            house: House::Column(0),
            digit: 1
        }));
        assert!(result.violations.contains(&Violation::Duplicate {
            house: House::Block(0),
            digit: 1
        }));
        assert!(!result
            .violations
            .iter()
            .any(|v| matches!(v, Violation::Duplicate { house: House::Row(_), .. })));
    }

    #[test]
    fn test_clue_and_blank_detection() {
        let solution = parse_puzzle_from_string("2413\n1324\n3142\n423.\n").unwrap();
        let result = SudokuRules::check_solution(&solution, &puzzle());
        assert!(result.violations.contains(&Violation::Blank { row: 3, col: 3 }));

        let changed = parse_puzzle_from_string("4213\n1324\n3142\n2431\n").unwrap();
        let result = SudokuRules::check_solution(&changed, &puzzle());
        assert!(!result.is_valid);
        assert!(result
            .violations
            .iter()
            .any(|v| matches!(v, Violation::ClueChanged { row: 3, col: 1, expected: 2, .. })));
    }

    #[test]
    fn test_size_mismatch() {
        let result = SudokuRules::check_solution(&Grid::new(9).unwrap(), &puzzle());
        assert_eq!(result.violations, vec![Violation::SizeMismatch { expected: 4, found: 9 }]);
    }

    #[test]
    fn test_conflicting_clues() {
        assert!(SudokuRules::conflicting_clues(&puzzle()).is_empty());

        let conflict = parse_puzzle_from_string("11..\n....\n....\n....\n").unwrap();
        let conflicts = SudokuRules::conflicting_clues(&conflict);
        assert!(conflicts.contains(&(House::Row(0), 1)));
        assert!(conflicts.contains(&(House::Block(0), 1)));
        assert_eq!(conflicts.len(), 2);
    }
}
