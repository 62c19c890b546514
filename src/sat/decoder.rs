//! Translation of solver models back into Sudoku grids

use super::solver::Model;
use super::VariableNamer;
use crate::sudoku::{Grid, GridError};
use thiserror::Error;

/// The model does not describe exactly one digit per cell.
///
/// This points at a defect in the encoding or the solver, never at an
/// unsolvable puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("cell ({row}, {col}) is assigned both {first} and {second}")]
    MultipleDigits { row: usize, col: usize, first: usize, second: usize },
    #[error("cell ({row}, {col}) has no digit assigned")]
    MissingDigit { row: usize, col: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Rebuilds the solution grid from the true atoms of a model
#[derive(Debug, Clone, Copy)]
pub struct SolutionDecoder {
    namer: VariableNamer,
}

impl SolutionDecoder {
    pub fn new(namer: VariableNamer) -> Self {
        Self { namer }
    }

    /// Decode `model` into a fully populated grid.
    ///
    /// True atoms outside the cell domain are ignored; a cell with two true
    /// atoms or none is an error.
    pub fn decode(&self, model: &Model) -> Result<Grid, DecodeError> {
        let size = self.namer.size();
        let mut grid = Grid::new(size)?;

        // sorted so a conflict is reported the same way on every run
        let mut true_atoms: Vec<i32> = model
            .iter()
            .filter(|&(_, &value)| value)
            .map(|(&atom, _)| atom)
            .collect();
        true_atoms.sort_unstable();

        for atom in true_atoms {
            let Some((row, col, digit)) = self.namer.decode(atom) else {
                continue;
            };
            if let Some(first) = grid.get(row, col) {
                return Err(DecodeError::MultipleDigits { row, col, first, second: digit });
            }
            grid.set(row, col, Some(digit))?;
        }

        for row in 0..size {
            for col in 0..size {
                if grid.get(row, col).is_none() {
                    return Err(DecodeError::MissingDigit { row, col });
                }
            }
        }

        Ok(grid)
    }

    /// True atoms of `grid`'s filled cells, used to block a found solution
    pub fn true_atoms(&self, grid: &Grid) -> Vec<i32> {
        grid.clues()
            .into_iter()
            .filter_map(|(row, col, digit)| self.namer.encode(row, col, digit).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::parse_puzzle_from_string;

    fn model_for(grid: &Grid, namer: &VariableNamer) -> Model {
        let mut model = Model::new();
        for row in 0..grid.size {
            for col in 0..grid.size {
                for digit in 1..=grid.size {
                    let atom = namer.encode(row, col, digit).unwrap();
                    model.insert(atom, grid.get(row, col) == Some(digit));
                }
            }
        }
        model
    }

    #[test]
    fn test_decode_complete_model() {
        let namer = VariableNamer::new(4).unwrap();
        let expected = parse_puzzle_from_string("2413\n1324\n3142\n4231\n").unwrap();
        let decoder = SolutionDecoder::new(namer);

        let mut model = model_for(&expected, &namer);
        // atoms the encoding never produced are not cell atoms
        model.insert(65, true);
        model.insert(100, false);

        assert_eq!(decoder.decode(&model).unwrap(), expected);
    }

    #[test]
    fn test_decode_multiple_digits() {
        let namer = VariableNamer::new(4).unwrap();
        let solution = parse_puzzle_from_string("2413\n1324\n3142\n4231\n").unwrap();
        let mut model = model_for(&solution, &namer);
        model.insert(namer.encode(2, 1, 4).unwrap(), true);

        let err = SolutionDecoder::new(namer).decode(&model).unwrap_err();
        assert_eq!(err, DecodeError::MultipleDigits { row: 2, col: 1, first: 1, second: 4 });
    }

    #[test]
    fn test_decode_missing_digit() {
        let namer = VariableNamer::new(4).unwrap();
        let solution = parse_puzzle_from_string("2413\n1324\n3142\n4231\n").unwrap();
        let mut model = model_for(&solution, &namer);
        model.insert(namer.encode(3, 3, 1).unwrap(), false);

        let err = SolutionDecoder::new(namer).decode(&model).unwrap_err();
        assert_eq!(err, DecodeError::MissingDigit { row: 3, col: 3 });
    }

    #[test]
    fn test_true_atoms() {
        let namer = VariableNamer::new(4).unwrap();
        let decoder = SolutionDecoder::new(namer);
        let puzzle = parse_puzzle_from_string("..1.\n.3.4\n3.4.\n.2..\n").unwrap();
        let atoms = decoder.true_atoms(&puzzle);
        assert_eq!(atoms.len(), 6);
        assert!(atoms.contains(&namer.encode(1, 3, 4).unwrap()));
    }
}
