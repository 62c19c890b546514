//! Solution representation for Sudoku puzzles

use crate::sudoku::Grid;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A solved puzzle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// The puzzle as given
    pub puzzle: Grid,
    /// The completed grid
    pub grid: Grid,
    /// Time taken to find this solution
    #[serde(skip)]
    pub solve_time: Duration,
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    /// Identifier derived from the solved grid
    pub id: String,
    pub size: usize,
    pub clue_count: usize,
    /// Cells the solver had to fill in
    pub filled_count: usize,
}

impl Solution {
    pub fn new(puzzle: Grid, grid: Grid, solve_time: Duration) -> Self {
        let metadata = SolutionMetadata::analyze(&puzzle, &grid);
        Self {
            puzzle,
            grid,
            solve_time,
            metadata,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string. Grids that break [`Grid::set`]'s checks are
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl SolutionMetadata {
    pub fn analyze(puzzle: &Grid, grid: &Grid) -> Self {
        Self {
            id: Self::generate_id(grid),
            size: grid.size,
            clue_count: puzzle.clue_count(),
            filled_count: puzzle.blank_count(),
        }
    }

    fn generate_id(grid: &Grid) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        grid.cells.hash(&mut hasher);
        grid.size.hash(&mut hasher);

        format!("sol_{:x}", hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::parse_puzzle_from_string;
    use tempfile::tempdir;

    fn sample() -> Solution {
        let puzzle = parse_puzzle_from_string("..1.\n.3.4\n3.4.\n.2..\n").unwrap();
        let grid = parse_puzzle_from_string("2413\n1324\n3142\n4231\n").unwrap();
        Solution::new(puzzle, grid, Duration::from_millis(3))
    }

    #[test]
    fn test_metadata() {
        let solution = sample();
        assert_eq!(solution.metadata.size, 4);
        assert_eq!(solution.metadata.clue_count, 6);
        assert_eq!(solution.metadata.filled_count, 10);
        assert!(solution.metadata.id.starts_with("sol_"));
        assert_eq!(solution.metadata.id, sample().metadata.id);
    }

    #[test]
    fn test_json_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("solution.json");

        let solution = sample();
        solution.save_to_file(&path).unwrap();
        let loaded = Solution::load_from_file(&path).unwrap();

        assert_eq!(loaded.grid, solution.grid);
        assert_eq!(loaded.puzzle, solution.puzzle);
        assert_eq!(loaded.metadata.id, solution.metadata.id);
        assert_eq!(loaded.solve_time, Duration::ZERO);
    }

    #[test]
    fn test_rejects_tampered_json() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["grid"]["cells"][0] = serde_json::json!(9);
        let err = Solution::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("outside 1..=4"));

        let mut value = serde_json::to_value(sample()).unwrap();
        value["puzzle"]["block_size"] = serde_json::json!(0);
        assert!(Solution::from_json(&value.to_string()).is_err());
    }
}
