//! Variable naming for the Sudoku SAT encoding

use thiserror::Error;

/// Errors raised when a triple falls outside the grid's variable domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    #[error("cell ({row}, {col}) out of bounds for {size}x{size} grid")]
    CellOutOfBounds { row: usize, col: usize, size: usize },
    #[error("digit {digit} outside 1..={size}")]
    DigitOutOfRange { digit: usize, size: usize },
    #[error("grid size {0} has more atoms than a DIMACS variable can address")]
    TooLarge(usize),
}

/// Deterministic bijection between `(row, col, digit)` triples and SAT
/// variable ids.
///
/// The atom for `(r, c, d)` is `r·N² + c·N + (d − 1) + 1`, so ids are dense in
/// `1..=N³` and depend only on N.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableNamer {
    size: usize,
}

impl VariableNamer {
    /// Create a namer for an N×N grid
    pub fn new(size: usize) -> Result<Self, VariableError> {
        let atoms = size
            .checked_mul(size)
            .and_then(|sq| sq.checked_mul(size))
            .ok_or(VariableError::TooLarge(size))?;
        if atoms > i32::MAX as usize {
            return Err(VariableError::TooLarge(size));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of atoms in the domain (N³)
    pub fn variable_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// Atom id for "cell `(row, col)` holds `digit`"
    pub fn encode(&self, row: usize, col: usize, digit: usize) -> Result<i32, VariableError> {
        if row >= self.size || col >= self.size {
            return Err(VariableError::CellOutOfBounds { row, col, size: self.size });
        }
        if digit == 0 || digit > self.size {
            return Err(VariableError::DigitOutOfRange { digit, size: self.size });
        }
        Ok(((row * self.size + col) * self.size + digit) as i32)
    }

    /// Triple named by `atom`, or `None` when the atom is not a cell atom
    /// of this grid. The sign of `atom` is ignored.
    pub fn decode(&self, atom: i32) -> Option<(usize, usize, usize)> {
        let var = atom.unsigned_abs() as usize;
        if var == 0 || var > self.variable_count() {
            return None;
        }
        let index = var - 1;
        let digit = index % self.size + 1;
        let cell = index / self.size;
        Some((cell / self.size, cell % self.size, digit))
    }

    /// Atoms for every digit of one cell, in digit order
    pub fn cell_atoms(&self, row: usize, col: usize) -> Result<Vec<i32>, VariableError> {
        (1..=self.size).map(|digit| self.encode(row, col, digit)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_layout() {
        let namer = VariableNamer::new(4).unwrap();
        assert_eq!(namer.encode(0, 0, 1).unwrap(), 1);
        assert_eq!(namer.encode(0, 0, 4).unwrap(), 4);
        assert_eq!(namer.encode(0, 1, 1).unwrap(), 5);
        assert_eq!(namer.encode(1, 0, 1).unwrap(), 17);
        assert_eq!(namer.encode(3, 3, 4).unwrap(), 64);
        assert_eq!(namer.variable_count(), 64);
    }

    #[test]
    fn test_bijection() {
        for size in [1, 4, 9, 16] {
            let namer = VariableNamer::new(size).unwrap();
            let mut seen = vec![false; namer.variable_count() + 1];
            for row in 0..size {
                for col in 0..size {
                    for digit in 1..=size {
                        let atom = namer.encode(row, col, digit).unwrap();
                        assert!(!seen[atom as usize], "atom {} produced twice", atom);
                        seen[atom as usize] = true;
                        assert_eq!(namer.decode(atom), Some((row, col, digit)));
                        assert_eq!(namer.decode(-atom), Some((row, col, digit)));
                    }
                }
            }
            assert!(seen[1..].iter().all(|&used| used));
        }
    }

    #[test]
    fn test_variable_bounds() {
        let namer = VariableNamer::new(4).unwrap();

        assert!(namer.encode(3, 3, 4).is_ok());
        assert_eq!(
            namer.encode(4, 0, 1),
            Err(VariableError::CellOutOfBounds { row: 4, col: 0, size: 4 })
        );
        assert!(namer.encode(0, 4, 1).is_err());
        assert_eq!(
            namer.encode(0, 0, 0),
            Err(VariableError::DigitOutOfRange { digit: 0, size: 4 })
        );
        assert!(namer.encode(0, 0, 5).is_err());

        assert_eq!(namer.decode(0), None);
        assert_eq!(namer.decode(65), None);
    }

    #[test]
    fn test_cell_atoms() {
        let namer = VariableNamer::new(9).unwrap();
        let atoms = namer.cell_atoms(2, 5).unwrap();
        assert_eq!(atoms.len(), 9);
        for (i, atom) in atoms.iter().enumerate() {
            assert_eq!(namer.decode(*atom), Some((2, 5, i + 1)));
        }
    }

    #[test]
    fn test_too_large() {
        assert!(VariableNamer::new(1 << 11).is_err());
    }
}
