//! SAT encoding, solving and decoding for Sudoku

pub mod combinations;
pub mod constraints;
pub mod decoder;
pub mod encoder;
pub mod solver;
pub mod variables;

pub use combinations::combinations;
pub use constraints::{Clause, ClauseGroups, Cnf, ConstraintFamily, ConstraintGenerator};
pub use decoder::{DecodeError, SolutionDecoder};
pub use encoder::{EncodingStatistics, SatEncoder, SolvedGrid};
pub use solver::{Model, SatSolver, SolveOutcome, SolverAdapter};
pub use variables::{VariableError, VariableNamer};
