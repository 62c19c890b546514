//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::puzzle::Solution;
use crate::sat::Cnf;
use crate::sudoku::{io::grid_to_string, Grid};
use anyhow::{Context, Result};
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a grid with block separators
    pub fn format_grid(grid: &Grid) -> String {
        let width = grid.size.to_string().len();
        let block_width = grid.block_size * (width + 1) + 1;
        let separator = vec!["-".repeat(block_width); grid.block_size].join("+");

        let mut output = String::new();
        for row in 0..grid.size {
            if row > 0 && row % grid.block_size == 0 {
                output.push_str(&separator);
                output.push('\n');
            }
            for col in 0..grid.size {
                if col > 0 && col % grid.block_size == 0 {
                    output.push_str(" |");
                }
                match grid.get(row, col) {
                    Some(digit) => output.push_str(&format!(" {:>width$}", digit)),
                    None => output.push_str(&format!(" {:>width$}", ".")),
                }
            }
            output.push('\n');
        }
        output
    }

    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.metadata.id));
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));
        output.push_str(&format!(
            "Clues: {}, filled: {}\n\n",
            solution.metadata.clue_count, solution.metadata.filled_count
        ));
        output.push_str(&Self::format_grid(&solution.grid));

        output
    }

    /// Format multiple solutions as a summary table
    pub fn format_solution_summary(solutions: &[Solution]) -> String {
        let mut output = String::new();

        output.push_str("Solutions Summary:\n");
        output.push_str("ID                   | Size  | Clues | Time(ms)\n");
        output.push_str("---------------------|-------|-------|---------\n");

        for solution in solutions {
            output.push_str(&format!(
                "{:20} | {:>5} | {:>5} | {:>8}\n",
                solution.metadata.id,
                format!("{}x{}", solution.metadata.size, solution.metadata.size),
                solution.metadata.clue_count,
                solution.solve_time.as_millis()
            ));
        }

        output
    }

    /// Save solutions to files based on output format
    pub fn save_solutions<P: AsRef<Path>>(
        solutions: &[Solution],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text | OutputFormat::Dimacs => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filepath = output_dir.join(format!("solution_{:03}.txt", i + 1));
                    std::fs::write(&filepath, grid_to_string(&solution.grid))
                        .with_context(|| format!("Failed to write {}", filepath.display()))?;
                }
            }
            OutputFormat::Json => {
                for (i, solution) in solutions.iter().enumerate() {
                    let filepath = output_dir.join(format!("solution_{:03}.json", i + 1));
                    solution.save_to_file(filepath)?;
                }
            }
        }

        Ok(())
    }

    /// Write a CNF instance as a DIMACS file
    pub fn save_cnf<P: AsRef<Path>>(cnf: &Cnf, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = std::io::BufWriter::new(file);
        cnf.write_dimacs(&mut writer)
            .with_context(|| format!("Failed to write DIMACS to {}", path.display()))?;
        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
