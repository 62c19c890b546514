//! Configuration settings for the Sudoku SAT solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub encoding: EncodingConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Stop after this many distinct solutions; 2 checks uniqueness
    pub max_solutions: usize,
    /// Re-check decoded grids against the Sudoku rules
    pub verify_solutions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Emit an "at least one digit" clause for every cell
    pub cell_constraints: bool,
    /// Build the constraint families concurrently
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Dimacs,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            cell_constraints: true,
            parallel: true,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                max_solutions: 1,
                verify_solutions: true,
            },
            encoding: EncodingConfig::default(),
            input: InputConfig {
                puzzle_file: PathBuf::from("input/puzzles/small.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/solutions"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.max_solutions == 0 {
            anyhow::bail!("Maximum solutions must be positive");
        }

        if !self.input.puzzle_file.exists() {
            anyhow::bail!("Puzzle file does not exist: {}", self.input.puzzle_file.display());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(max_solutions) = cli_overrides.max_solutions {
            self.solver.max_solutions = max_solutions;
        }
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.sequential {
            self.encoding.parallel = false;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_solutions: Option<usize>,
    pub puzzle_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub sequential: bool,
}
