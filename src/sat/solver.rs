//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use anyhow::Result;
use cadical::Solver;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Truth assignment returned by a solver, keyed by atom id
pub type Model = HashMap<i32, bool>;

/// Outcome of a single solve call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Sat(Model),
    Unsat,
}

impl SolveOutcome {
    pub fn into_model(self) -> Option<Model> {
        match self {
            SolveOutcome::Sat(model) => Some(model),
            SolveOutcome::Unsat => None,
        }
    }
}

/// Boundary to an external SAT engine.
///
/// Implementations accept clauses incrementally and answer SAT with a model
/// covering every atom seen so far, or UNSAT. A backend that gives up
/// without an answer reports an error.
pub trait SolverAdapter {
    /// Add a single clause
    fn add_clause(&mut self, clause: &Clause) -> Result<()>;

    /// Decide satisfiability of all clauses added so far
    fn solve(&mut self) -> Result<SolveOutcome>;

    /// Add clauses in order
    fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }
}

/// SAT solver wrapper for CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    last_solve_time: Duration,
}

/// Statistics about the solving process
#[derive(Debug, Clone)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
    pub solve_time: Duration,
}

impl SatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
            last_solve_time: Duration::ZERO,
        }
    }

    /// Extract variable assignment from the solver
    fn extract_assignment(&self) -> Model {
        let mut assignment = HashMap::with_capacity(self.variable_count);

        for var in 1..=self.variable_count as i32 {
            if let Some(value) = self.solver.value(var) {
                assignment.insert(var, value);
            }
        }

        assignment
    }

    /// Get solver statistics
    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clause_count,
            solve_time: self.last_solve_time,
        }
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverAdapter for SatSolver {
    fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            anyhow::bail!("Cannot add empty clause (unsatisfiable)");
        }

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());

        self.clause_count += 1;
        Ok(())
    }

    fn solve(&mut self) -> Result<SolveOutcome> {
        let start_time = Instant::now();
        let result = self.solver.solve();
        self.last_solve_time = start_time.elapsed();

        match result {
            Some(true) => Ok(SolveOutcome::Sat(self.extract_assignment())),
            Some(false) => Ok(SolveOutcome::Unsat),
            None => anyhow::bail!("Solver returned unknown result"),
        }
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        Ok(())
    }
}
