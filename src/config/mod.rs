//! Configuration management for the Sudoku SAT solver

pub mod settings;

pub use settings::{
    Settings, SolverConfig, InputConfig, OutputConfig, EncodingConfig, OutputFormat, CliOverrides
};
