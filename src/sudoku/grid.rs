//! Grid representation for N×N Sudoku puzzles and their solutions

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while building a grid from untrusted input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid cannot be empty")]
    Empty,
    #[error("grid size {0} is not a perfect square")]
    NotPerfectSquare(usize),
    #[error("row {row} has length {len}, expected {expected}")]
    RowLength { row: usize, len: usize, expected: usize },
    #[error("digit {digit} at ({row}, {col}) is outside 1..={size}")]
    DigitOutOfRange { row: usize, col: usize, digit: usize, size: usize },
    #[error("invalid token '{token}' at ({row}, {col})")]
    InvalidToken { row: usize, col: usize, token: String },
    #[error("grid has {len} cells, expected {expected}")]
    CellCount { len: usize, expected: usize },
    #[error("block size {found} does not match {expected} for a {size}x{size} grid")]
    BlockSize { size: usize, expected: usize, found: usize },
    #[error("coordinates ({row}, {col}) out of bounds for {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },
}

/// Returns `Some(root)` when `n` is a perfect square of a positive integer.
pub fn block_size_for(n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let mut root = (n as f64).sqrt() as usize;
    // float rounding can land one off in either direction
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    (root * root == n).then_some(root)
}

/// An N×N Sudoku grid. Blank cells are `None`.
///
/// The same type carries puzzles (partially filled) and solutions (every
/// cell filled). Deserialized grids go through the same checks as
/// [`Grid::set`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    pub size: usize,
    pub block_size: usize,
    pub cells: Vec<Option<usize>>,
}

/// Unchecked serialized form of [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    block_size: usize,
    cells: Vec<Option<usize>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let mut grid = Grid::new(raw.size)?;
        if raw.block_size != grid.block_size {
            return Err(GridError::BlockSize {
                size: raw.size,
                expected: grid.block_size,
                found: raw.block_size,
            });
        }
        if raw.cells.len() != grid.cells.len() {
            return Err(GridError::CellCount {
                len: raw.cells.len(),
                expected: grid.cells.len(),
            });
        }
        for (idx, digit) in raw.cells.into_iter().enumerate() {
            grid.set(idx / raw.size, idx % raw.size, digit)?;
        }
        Ok(grid)
    }
}

impl Grid {
    /// Create a blank grid of side `size`
    pub fn new(size: usize) -> Result<Self, GridError> {
        let block_size = block_size_for(size).ok_or(GridError::NotPerfectSquare(size))?;
        Ok(Self {
            size,
            block_size,
            cells: vec![None; size * size],
        })
    }

    /// Create a grid from rows of optional digits
    pub fn from_rows(rows: Vec<Vec<Option<usize>>>) -> Result<Self, GridError> {
        if rows.is_empty() {
            return Err(GridError::Empty);
        }

        let size = rows.len();
        let mut grid = Self::new(size)?;

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GridError::RowLength {
                    row: row_idx,
                    len: row.len(),
                    expected: size,
                });
            }
            for (col_idx, digit) in row.into_iter().enumerate() {
                grid.set(row_idx, col_idx, digit)?;
            }
        }

        Ok(grid)
    }

    /// Create a grid from string entries: a digit `"1"..="N"` or a blank
    /// (empty or whitespace-only) marker.
    pub fn from_strings<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, GridError> {
        let mut parsed = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(row.len());
            for (col_idx, entry) in row.iter().enumerate() {
                let token = entry.as_ref().trim();
                if token.is_empty() {
                    cells.push(None);
                    continue;
                }
                let digit = token.parse::<usize>().map_err(|_| GridError::InvalidToken {
                    row: row_idx,
                    col: col_idx,
                    token: token.to_string(),
                })?;
                cells.push(Some(digit));
            }
            parsed.push(cells);
        }
        Self::from_rows(parsed)
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Get cell value at coordinates. Out of bounds reads as blank.
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            self.cells[self.index(row, col)]
        } else {
            None
        }
    }

    /// Set cell value at coordinates, rejecting digits outside `1..=size`
    pub fn set(&mut self, row: usize, col: usize, digit: Option<usize>) -> Result<(), GridError> {
        if row >= self.size || col >= self.size {
            return Err(GridError::OutOfBounds { row, col, size: self.size });
        }
        if let Some(d) = digit {
            if d == 0 || d > self.size {
                return Err(GridError::DigitOutOfRange { row, col, digit: d, size: self.size });
            }
        }
        let idx = self.index(row, col);
        self.cells[idx] = digit;
        Ok(())
    }

    /// All pre-filled cells as `(row, col, digit)`
    pub fn clues(&self) -> Vec<(usize, usize, usize)> {
        let mut clues = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if let Some(digit) = self.get(row, col) {
                    clues.push((row, col, digit));
                }
            }
        }
        clues
    }

    pub fn clue_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn blank_count(&self) -> usize {
        self.cells.len() - self.clue_count()
    }

    /// Cells of block `block` (numbered row-major, `0..size`)
    pub fn block_cells(&self, block: usize) -> Vec<(usize, usize)> {
        let top = (block / self.block_size) * self.block_size;
        let left = (block % self.block_size) * self.block_size;
        let mut cells = Vec::with_capacity(self.size);
        for row in top..top + self.block_size {
            for col in left..left + self.block_size {
                cells.push((row, col));
            }
        }
        cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size.to_string().len();
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.get(row, col) {
                    Some(digit) => write!(f, "{:>width$}", digit)?,
                    None => write!(f, "{:>width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
