//! File I/O operations for Sudoku puzzles

use super::grid::GridError;
use super::Grid;
use anyhow::{Context, Result};
use std::path::Path;

/// Characters accepted as blank cells in compact rows
const BLANK_CHARS: [char; 4] = ['.', '0', '_', '*'];

/// Load a puzzle from a text file
///
/// One row per line; `#` starts a comment line. Rows are either compact
/// (one character per cell, N ≤ 9) or comma-separated (one field per cell,
/// empty fields are blank).
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_puzzle_from_string(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Parse a puzzle from its text representation
pub fn parse_puzzle_from_string(content: &str) -> Result<Grid, GridError> {
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .collect();

    if lines.is_empty() {
        return Err(GridError::Empty);
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row_idx, line) in lines.iter().enumerate() {
        let row = if line.contains(',') {
            parse_separated_row(line, row_idx)?
        } else {
            parse_compact_row(line, row_idx)?
        };
        rows.push(row);
    }

    Grid::from_rows(rows)
}

fn parse_separated_row(line: &str, row_idx: usize) -> Result<Vec<Option<usize>>, GridError> {
    line.split(',')
        .enumerate()
        .map(|(col_idx, field)| {
            let field = field.trim();
            if field.is_empty() || field.chars().all(|ch| BLANK_CHARS.contains(&ch)) {
                return Ok(None);
            }
            field.parse::<usize>().map(Some).map_err(|_| GridError::InvalidToken {
                row: row_idx,
                col: col_idx,
                token: field.to_string(),
            })
        })
        .collect()
}

fn parse_compact_row(line: &str, row_idx: usize) -> Result<Vec<Option<usize>>, GridError> {
    line.chars()
        .filter(|ch| !ch.is_whitespace())
        .enumerate()
        .map(|(col_idx, ch)| {
            if BLANK_CHARS.contains(&ch) {
                return Ok(None);
            }
            ch.to_digit(10)
                .map(|d| Some(d as usize))
                .ok_or_else(|| GridError::InvalidToken {
                    row: row_idx,
                    col: col_idx,
                    token: ch.to_string(),
                })
        })
        .collect()
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to its text representation (compact up to 9×9)
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.size * (grid.size * 3 + 1));

    for row in 0..grid.size {
        if grid.size <= 9 {
            for col in 0..grid.size {
                match grid.get(row, col) {
                    Some(digit) => result.push_str(&digit.to_string()),
                    None => result.push('.'),
                }
            }
        } else {
            let fields: Vec<String> = (0..grid.size)
                .map(|col| grid.get(row, col).map(|d| d.to_string()).unwrap_or_default())
                .collect();
            result.push_str(&fields.join(","));
        }
        result.push('\n');
    }

    result
}

/// Write example puzzle files for testing
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let small = "# 4x4, unique solution\n..1.\n.3.4\n3.4.\n.2..\n";
    std::fs::write(dir.join("small.txt"), small).context("Failed to write small.txt")?;

    let classic = "\
# 9x9
53..7....
6..195...
.98....6.
8...6...3
4..8.3..1
7...2...6
.6....28.
...419..5
....8..79
";
    std::fs::write(dir.join("classic.txt"), classic).context("Failed to write classic.txt")?;

    // same digit twice in the first row
    let conflict = "# 4x4, no solution\n11..\n....\n....\n....\n";
    std::fs::write(dir.join("conflict.txt"), conflict).context("Failed to write conflict.txt")?;

    Ok(())
}
