//! # dlx-sudoku
//!
//! Command-line driver for the dancing-links Sudoku solver.
//!
//! A puzzle is a row-major digit string of length N² (`0`, `.` or a space
//! for blanks), passed inline or read from a file. By default the solver
//! stops at the first completion; `--all` enumerates every one.
//!
//! ```sh
//! # First solution of an inline 9x9 puzzle
//! dlx-sudoku 005902000279008040800300002300091057020000080580420006100009003090200571000605800
//!
//! # Every completion of a puzzle file, capped at 20
//! dlx-sudoku file --path puzzle.sudoku --all --max-solutions 20
//! ```

use clap::{Args, Parser, Subcommand};
use dlx_sudoku::dlx::search::SolverControl;
use dlx_sudoku::sudoku::solver::Sudoku;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Global allocator, as used across the solver's tooling.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "dlx-sudoku", version, about = "A dancing-links Sudoku solver")]
struct Cli {
    /// An optional inline puzzle. If provided without a subcommand, it is
    /// solved directly.
    #[arg(global = true)]
    grid: Option<String>,

    /// Specifies the subcommand to execute (e.g. `line`, `file`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands for the solver.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle given inline as a digit string.
    Line {
        /// Row-major digit string; `0`, `.` or a space mark blanks.
        grid: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle read from a file.
    ///
    /// The file holds the digit string, optionally split across lines;
    /// lines starting with `#` are ignored.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enumerate every completion instead of stopping at the first.
    #[arg(short, long, default_value_t = false)]
    all: bool,

    /// Upper bound on emitted solutions when `--all` is set; 0 means no
    /// bound.
    #[arg(long, default_value_t = 0)]
    max_solutions: usize,

    /// Print solution count and timing after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Line { grid, common }) => solve_line(grid, common),
        Some(Commands::File { path, common }) => solve_file(path, common),
        None => match &cli.grid {
            Some(grid) => solve_line(grid, &cli.common),
            None => Err("no puzzle given; run with --help for usage".to_owned()),
        },
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

/// Parses and solves one puzzle line, printing each emitted grid.
fn solve_line(line: &str, common: &CommonOptions) -> Result<(), String> {
    let sudoku = Sudoku::from_line(&line.replace('.', "0")).map_err(|e| e.to_string())?;

    let limit = if common.all { common.max_solutions } else { 1 };
    let started = Instant::now();

    let mut emitted = 0;
    let found = sudoku.solve(|board| {
        emitted += 1;
        println!("{board}");
        if limit != 0 && emitted >= limit {
            SolverControl::Stop
        } else {
            SolverControl::Continue
        }
    });

    let elapsed = started.elapsed();
    if found == 0 {
        println!("Unable to find solution");
    }
    if common.stats {
        println!("{found} solution(s) in {elapsed:?}");
    }
    Ok(())
}

/// Reads a puzzle file and solves its contents as one line.
fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

    let line: String = contents
        .lines()
        .filter(|l| !l.trim_start().starts_with('#'))
        .collect();

    solve_line(&line, common)
}
