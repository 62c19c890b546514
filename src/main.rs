//! Main CLI application for the Sudoku SAT solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use sudoku_sat::{
    config::{CliOverrides, OutputFormat, Settings},
    puzzle::{Solution, SudokuProblem},
    sudoku::{create_example_puzzles, load_puzzle_from_file, SudokuRules},
    utils::{ColorOutput, SolutionFormatter},
};

#[derive(Parser)]
#[command(name = "sudoku_sat")]
#[command(about = "Sudoku solver that delegates to a SAT solver")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Maximum solutions to find (overrides config)
        #[arg(short, long)]
        max_solutions: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Build constraint families one after another
        #[arg(long)]
        sequential: bool,
    },

    /// Print the generated clauses for a puzzle
    Clauses {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Print DIMACS instead of the numbered listing
        #[arg(long)]
        dimacs: bool,

        /// Leave out the per-cell "at least one digit" clauses
        #[arg(long)]
        no_cell_constraints: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a completed grid against a puzzle
    Validate {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Solution file: a text grid, or a `.json` file written by `solve`
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Show encoding statistics and clue conflicts for a puzzle
    Analyze {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            max_solutions,
            output,
            format,
            sequential,
        } => {
            let overrides = CliOverrides {
                max_solutions,
                puzzle_file: puzzle,
                output_dir: output,
                format,
                sequential,
            };
            solve_command(config, overrides)
        }
        Commands::Clauses {
            puzzle,
            dimacs,
            no_cell_constraints,
        } => clauses_command(puzzle, dimacs, no_cell_constraints),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate { puzzle, solution } => validate_command(puzzle, solution),
        Commands::Analyze { puzzle } => analyze_command(puzzle),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::warn!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn solve_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let start_time = Instant::now();
    let mut problem =
        SudokuProblem::new(settings.clone()).context("Failed to create Sudoku problem")?;

    println!("{}", ColorOutput::info("Puzzle:"));
    println!("{}", SolutionFormatter::format_grid(problem.puzzle()));

    let solutions = problem.solve().context("Failed to solve puzzle")?;
    let total_time = start_time.elapsed();

    if settings.output.format == OutputFormat::Dimacs {
        let path = settings.output.output_directory.join("instance.cnf");
        SolutionFormatter::save_cnf(&problem.cnf()?, &path)?;
        println!("CNF instance written to {}", path.display());
    }

    if solutions.is_empty() {
        println!("{}", ColorOutput::warning("No solution exists for this puzzle"));
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Found {} solution(s) in {:.3}s",
            solutions.len(),
            total_time.as_secs_f64()
        ))
    );

    for solution in &solutions {
        println!("\n{}", SolutionFormatter::format_solution(solution));
    }
    if solutions.len() > 1 {
        println!("{}", SolutionFormatter::format_solution_summary(&solutions));
    }

    SolutionFormatter::save_solutions(
        &solutions,
        &settings.output.output_directory,
        &settings.output.format,
    )
    .context("Failed to save solutions")?;
    println!("Solutions saved to {}", settings.output.output_directory.display());

    Ok(())
}

fn clauses_command(puzzle_path: PathBuf, dimacs: bool, no_cell_constraints: bool) -> Result<()> {
    let puzzle = load_puzzle_from_file(&puzzle_path)?;

    let mut settings = Settings::default();
    settings.encoding.cell_constraints = !no_cell_constraints;
    let problem = SudokuProblem::with_puzzle(settings, puzzle)?;
    let cnf = problem.cnf()?;

    if dimacs {
        let stdout = std::io::stdout();
        let mut writer = std::io::BufWriter::new(stdout.lock());
        cnf.write_dimacs(&mut writer).context("Failed to write DIMACS")?;
    } else {
        print!("{}", cnf.listing(problem.encoder().namer()));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    let input_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&input_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    let mut unique = Settings::default();
    unique.solver.max_solutions = 2;
    unique.input.puzzle_file = PathBuf::from("input/puzzles/classic.txt");
    unique.to_file(&config_dir.join("uniqueness.yaml"))?;

    println!("{}", ColorOutput::success("Setup complete"));
    Ok(())
}

fn load_solution_grid(path: &Path) -> Result<sudoku_sat::Grid> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let solution = Solution::load_from_file(path)
            .with_context(|| format!("Failed to load solution from {}", path.display()))?;
        Ok(solution.grid)
    } else {
        load_puzzle_from_file(path)
    }
}

fn validate_command(puzzle_path: PathBuf, solution_path: PathBuf) -> Result<()> {
    let puzzle = load_puzzle_from_file(&puzzle_path)?;
    let solution = load_solution_grid(&solution_path)?;

    let result = SudokuRules::check_solution(&solution, &puzzle);
    println!("{}", result);

    if !result.is_valid {
        println!("{}", ColorOutput::error("Solution is invalid"));
        anyhow::bail!("{} does not solve {}", solution_path.display(), puzzle_path.display());
    }

    println!("{}", ColorOutput::success("Solution is valid"));
    Ok(())
}

fn analyze_command(puzzle_path: PathBuf) -> Result<()> {
    let puzzle = load_puzzle_from_file(&puzzle_path)?;

    println!("Puzzle ({}x{}):", puzzle.size, puzzle.size);
    println!("{}", SolutionFormatter::format_grid(&puzzle));

    let problem = SudokuProblem::with_puzzle(Settings::default(), puzzle)?;
    println!("{}", problem.encoding_statistics()?);

    let conflicts = problem.clue_conflicts();
    if conflicts.is_empty() {
        println!("No conflicting clues");
    } else {
        for (house, digit) in conflicts {
            println!("{}", ColorOutput::warning(&format!("Digit {} repeats in {}", digit, house)));
        }
    }
    Ok(())
}
