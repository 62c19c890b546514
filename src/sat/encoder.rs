//! SAT encoder for Sudoku puzzles

use super::constraints::{ClauseGroups, Cnf, ConstraintFamily, ConstraintGenerator};
use super::decoder::SolutionDecoder;
use super::solver::SolverAdapter;
use super::{Clause, VariableNamer};
use crate::config::EncodingConfig;
use crate::sudoku::Grid;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// A decoded solution together with the time the solver spent on it
#[derive(Debug, Clone)]
pub struct SolvedGrid {
    pub grid: Grid,
    pub solve_time: Duration,
}

/// Main SAT encoder for N×N Sudoku puzzles
#[derive(Debug, Clone)]
pub struct SatEncoder {
    config: EncodingConfig,
    constraint_generator: ConstraintGenerator,
    decoder: SolutionDecoder,
    size: usize,
    block_size: usize,
}

impl SatEncoder {
    /// Create an encoder for puzzles shaped like `puzzle`
    pub fn new(config: EncodingConfig, puzzle: &Grid) -> Result<Self> {
        let namer = VariableNamer::new(puzzle.size)
            .with_context(|| format!("Cannot encode a {}x{} grid", puzzle.size, puzzle.size))?;

        Ok(Self {
            config,
            constraint_generator: ConstraintGenerator::new(namer, puzzle.block_size),
            decoder: SolutionDecoder::new(namer),
            size: puzzle.size,
            block_size: puzzle.block_size,
        })
    }

    pub fn namer(&self) -> &VariableNamer {
        self.constraint_generator.namer()
    }

    fn check_shape(&self, puzzle: &Grid) -> Result<()> {
        if puzzle.size != self.size {
            anyhow::bail!(
                "Puzzle dimensions {}x{} don't match encoder dimensions {}x{}",
                puzzle.size,
                puzzle.size,
                self.size,
                self.size
            );
        }
        Ok(())
    }

    /// Build the clause groups for `puzzle` without merging them
    pub fn clause_groups(&self, puzzle: &Grid) -> Result<ClauseGroups> {
        self.check_shape(puzzle)?;

        let groups = if self.config.parallel {
            self.constraint_generator
                .generate_groups_parallel(puzzle, self.config.cell_constraints)
        } else {
            self.constraint_generator
                .generate_groups(puzzle, self.config.cell_constraints)
        }
        .context("Failed to generate SAT constraints")?;

        for family in ConstraintFamily::ALL {
            log::debug!("{:?} clauses: {}", family, groups.family(family).len());
        }

        Ok(groups)
    }

    /// Encode `puzzle` as one CNF instance
    pub fn encode(&self, puzzle: &Grid) -> Result<Cnf> {
        let groups = self.clause_groups(puzzle)?;
        let cnf = groups.aggregate(self.namer().variable_count());
        log::info!(
            "Generated {} clauses with {} variables",
            cnf.len(),
            cnf.variable_count
        );
        Ok(cnf)
    }

    /// Encode and solve `puzzle`, returning up to `max_solutions` distinct
    /// solutions. An empty result means the puzzle has no solution, so
    /// `max_solutions` must be at least 1.
    pub fn solve<S: SolverAdapter>(
        &self,
        puzzle: &Grid,
        solver: &mut S,
        max_solutions: usize,
    ) -> Result<Vec<SolvedGrid>> {
        if max_solutions == 0 {
            anyhow::bail!("Maximum solutions must be positive");
        }

        let cnf = self.encode(puzzle)?;

        solver
            .add_clauses(&cnf.clauses)
            .context("Failed to add clauses to SAT solver")?;

        let mut solutions = Vec::new();
        let start_time = Instant::now();

        while solutions.len() < max_solutions {
            let outcome = solver.solve().context("SAT solving failed")?;
            let Some(model) = outcome.into_model() else {
                break;
            };

            let grid = self
                .decoder
                .decode(&model)
                .context("Solver model does not describe a valid grid")?;

            // forbid this exact grid before looking for another one
            let blocking: Vec<i32> = self
                .decoder
                .true_atoms(&grid)
                .into_iter()
                .map(|atom| -atom)
                .collect();

            solutions.push(SolvedGrid {
                grid,
                solve_time: start_time.elapsed(),
            });

            if solutions.len() < max_solutions {
                solver
                    .add_clause(&Clause::new(blocking))
                    .context("Failed to add blocking clause")?;
            }
        }

        log::info!("Found {} solution(s)", solutions.len());
        Ok(solutions)
    }

    /// Encoding statistics for `puzzle`
    pub fn statistics(&self, puzzle: &Grid) -> Result<EncodingStatistics> {
        let groups = self.clause_groups(puzzle)?;

        Ok(EncodingStatistics {
            size: self.size,
            block_size: self.block_size,
            clues: puzzle.clue_count(),
            total_variables: self.namer().variable_count(),
            cell_clauses: groups.cells.len(),
            row_clauses: groups.rows.len(),
            column_clauses: groups.columns.len(),
            block_clauses: groups.blocks.len(),
            clue_clauses: groups.clues.len(),
        })
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingStatistics {
    pub size: usize,
    pub block_size: usize,
    pub clues: usize,
    pub total_variables: usize,
    pub cell_clauses: usize,
    pub row_clauses: usize,
    pub column_clauses: usize,
    pub block_clauses: usize,
    pub clue_clauses: usize,
}

impl EncodingStatistics {
    pub fn uniqueness_clauses(&self) -> usize {
        self.row_clauses + self.column_clauses + self.block_clauses
    }

    pub fn total_clauses(&self) -> usize {
        self.cell_clauses + self.uniqueness_clauses() + self.clue_clauses
    }
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(
            f,
            "  Grid: {}x{} (blocks {}x{})",
            self.size, self.size, self.block_size, self.block_size
        )?;
        writeln!(f, "  Clues: {}", self.clues)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Cell clauses: {}", self.cell_clauses)?;
        writeln!(f, "  Row clauses: {}", self.row_clauses)?;
        writeln!(f, "  Column clauses: {}", self.column_clauses)?;
        writeln!(f, "  Block clauses: {}", self.block_clauses)?;
        writeln!(f, "  Clue clauses: {}", self.clue_clauses)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses())?;
        Ok(())
    }
}
