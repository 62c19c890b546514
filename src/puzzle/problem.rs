//! Sudoku problem definition

use super::Solution;
use crate::config::Settings;
use crate::sat::{Cnf, EncodingStatistics, SatEncoder, SatSolver, SolverAdapter};
use crate::sudoku::{load_puzzle_from_file, Grid, House, SudokuRules};
use anyhow::{Context, Result};

/// A puzzle together with the settings used to solve it
pub struct SudokuProblem {
    settings: Settings,
    puzzle: Grid,
    encoder: SatEncoder,
}

impl SudokuProblem {
    /// Create a new problem, loading the puzzle named in `settings`
    pub fn new(settings: Settings) -> Result<Self> {
        let puzzle = load_puzzle_from_file(&settings.input.puzzle_file)
            .context("Failed to load puzzle file")?;

        Self::with_puzzle(settings, puzzle)
    }

    /// Create a problem with an explicit puzzle
    pub fn with_puzzle(settings: Settings, puzzle: Grid) -> Result<Self> {
        let encoder = SatEncoder::new(settings.encoding.clone(), &puzzle)?;

        Ok(Self {
            settings,
            puzzle,
            encoder,
        })
    }

    /// Solve the puzzle with CaDiCaL. An empty result means it has no
    /// solution.
    pub fn solve(&mut self) -> Result<Vec<Solution>> {
        let mut solver = SatSolver::new();
        let solutions = self.solve_with(&mut solver)?;
        log::debug!("{}", solver.statistics());
        Ok(solutions)
    }

    /// Solve the puzzle with the given backend.
    ///
    /// A decoded grid that breaks the Sudoku rules is an error, never a
    /// missing solution.
    pub fn solve_with<S: SolverAdapter>(&mut self, solver: &mut S) -> Result<Vec<Solution>> {
        log::info!(
            "Solving {}x{} puzzle with {} clues",
            self.puzzle.size,
            self.puzzle.size,
            self.puzzle.clue_count()
        );

        let solved = self
            .encoder
            .solve(&self.puzzle, solver, self.settings.solver.max_solutions)
            .context("SAT solving failed")?;

        if solved.is_empty() {
            log::info!("Puzzle has no solution");
            return Ok(Vec::new());
        }

        let mut solutions = Vec::with_capacity(solved.len());
        for (i, found) in solved.into_iter().enumerate() {
            if self.settings.solver.verify_solutions {
                let result = SudokuRules::check_solution(&found.grid, &self.puzzle);
                if !result.is_valid {
                    anyhow::bail!("Solution {} failed validation: {}", i + 1, result);
                }
            }
            solutions.push(Solution::new(self.puzzle.clone(), found.grid, found.solve_time));
        }

        log::info!("Found {} solution(s)", solutions.len());
        Ok(solutions)
    }

    /// The CNF instance for this puzzle, for inspection
    pub fn cnf(&self) -> Result<Cnf> {
        self.encoder.encode(&self.puzzle)
    }

    pub fn puzzle(&self) -> &Grid {
        &self.puzzle
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn encoder(&self) -> &SatEncoder {
        &self.encoder
    }

    pub fn encoding_statistics(&self) -> Result<EncodingStatistics> {
        self.encoder.statistics(&self.puzzle)
    }

    /// Clue digits repeated within a house; such a puzzle is unsolvable
    pub fn clue_conflicts(&self) -> Vec<(House, usize)> {
        SudokuRules::conflicting_clues(&self.puzzle)
    }
}
