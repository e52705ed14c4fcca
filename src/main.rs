//! Calendar Puzzle Solver
//!
//! Solves the daily calendar puzzle: ten pieces must cover every cell of an
//! 8x8 board except the walls and the three cells showing the month, the
//! day and the weekday. Finds every solution for one date, or for all dates
//! in batch mode.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use calendar_puzzle::persistence::{self, DateSolutions};
use calendar_puzzle::statistics::Summary;
use calendar_puzzle::{create_board, solver, CalendarDate, Month, PuzzleError, Weekday};

/// Solves the calendar tiling puzzle.
#[derive(Parser)]
#[command(name = "calendar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one date and print its solutions.
    Solve {
        #[command(flatten)]
        date: DateArgs,
        /// Number of solutions to print.
        #[arg(long, default_value_t = 1)]
        show: usize,
    },
    /// Print the number of solutions for one date.
    Count {
        #[command(flatten)]
        date: DateArgs,
    },
    /// Solve every date and weekday combination and save the results.
    Batch {
        #[arg(long, default_value = "solutions.bin")]
        output: PathBuf,
    },
    /// Print solution count statistics from a saved archive.
    Stats {
        #[arg(long, default_value = "solutions.bin")]
        input: PathBuf,
    },
}

#[derive(Args)]
struct DateArgs {
    /// Day of month (1-31).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=31))]
    day: u8,
    /// Three-letter month code, e.g. Jan.
    #[arg(long)]
    month: Month,
    /// Three-letter weekday code, e.g. Mon.
    #[arg(long)]
    weekday: Weekday,
}

impl DateArgs {
    fn date(&self) -> Result<CalendarDate, PuzzleError> {
        CalendarDate::new(self.day, self.month, self.weekday)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve { date, show } => run_solve(&date, show),
        Command::Count { date } => run_count(&date),
        Command::Batch { output } => run_batch(&output),
        Command::Stats { input } => run_stats(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Solves one date and prints the first `show` solutions.
fn run_solve(args: &DateArgs, show: usize) -> Result<(), PuzzleError> {
    let date = args.date()?;
    let board = create_board(&date)?;
    println!("{date}:\n{board}\n");

    let solutions = solver::solve(&board);
    println!("Found {} solutions", solutions.len());
    for (i, solution) in solutions.iter().take(show).enumerate() {
        println!("\nSolution {}:\n{solution}", i + 1);
    }
    Ok(())
}

/// Prints the solution count for one date.
fn run_count(args: &DateArgs) -> Result<(), PuzzleError> {
    let date = args.date()?;
    let board = create_board(&date)?;
    println!("{} solutions", solver::count_solutions(&board));
    Ok(())
}

/// Solves all dates and writes the archive.
fn run_batch(output: &Path) -> Result<(), PuzzleError> {
    let dates: Vec<CalendarDate> = CalendarDate::all().collect();

    let progress = ProgressBar::new(dates.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut records = Vec::with_capacity(dates.len());
    for date in dates {
        progress.set_message(date.to_string());
        records.push(DateSolutions::solve(date)?);
        progress.inc(1);
    }
    progress.finish_with_message("done");

    persistence::save(output, &records)?;
    let total: usize = records.iter().map(|r| r.solutions.len()).sum();
    println!(
        "Solved {} puzzles ({} solutions), wrote {}",
        records.len(),
        total,
        output.display()
    );
    Ok(())
}

/// Loads an archive and prints its count distribution.
fn run_stats(input: &Path) -> Result<(), PuzzleError> {
    let records = persistence::load_all(input)?;
    let Some(summary) = Summary::from_records(&records) else {
        println!("No puzzles in {}", input.display());
        return Ok(());
    };

    println!("Puzzles: {}", summary.dates);
    println!("Max solutions: {}", summary.max);
    println!("Min solutions: {}", summary.min);
    println!("Mean solutions: {:.2}", summary.mean);
    println!("Median solutions: {:.1}", summary.median);
    println!("Standard deviation: {:.2}", summary.std_dev);

    if let Some(hardest) = records.iter().min_by_key(|r| r.solutions.len()) {
        println!("Fewest solutions: {}", hardest.date);
    }
    Ok(())
}
