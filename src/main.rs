//! gridlines: overlap-point counting for axis-aligned line segments.
//!
//! Usage: gridlines <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use gridlines::commands::{CountCommand, GenerateCommand, GenerateConfig};
use gridlines::diagram::{DiagramError, ParseMode};

#[derive(Parser)]
#[command(name = "gridlines")]
#[command(version)]
#[command(
    about = "Count integer grid points covered by two or more axis-aligned line segments",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count overlap points in a line diagram
    Count {
        /// Input diagram file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Treat malformed lines as errors instead of degenerate segments
        #[arg(long)]
        strict: bool,

        /// Print ingestion and sweep statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Generate a synthetic line diagram
    Generate {
        /// Output diagram file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of segments to generate
        #[arg(short = 'n', long, default_value = "1000")]
        count: u64,

        /// RNG seed (same seed, same diagram)
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Largest coordinate value
        #[arg(long, default_value = "1000")]
        max_coord: i64,

        /// Fraction of segments drawn diagonally
        #[arg(long, default_value = "0.1")]
        diagonal_frac: f64,

        /// Fraction of segments collapsed to a single point
        #[arg(long, default_value = "0.0")]
        point_frac: f64,

        /// Longest segment extent
        #[arg(long, default_value = "100")]
        max_len: i64,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Count {
            input,
            strict,
            stats,
        } => run_count(input, strict, stats),

        Commands::Generate {
            output,
            count,
            seed,
            max_coord,
            diagonal_frac,
            point_frac,
            max_len,
        } => run_generate(
            output,
            count,
            seed,
            max_coord,
            diagonal_frac,
            point_frac,
            max_len,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_count(input: Option<PathBuf>, strict: bool, stats: bool) -> Result<(), DiagramError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let mode = if strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };
    let cmd = CountCommand { mode };

    let report = match input {
        Some(path) if path.to_string_lossy() != "-" => cmd.run(&path, &mut handle)?,
        _ => cmd.run_reader(io::stdin().lock(), &mut handle)?,
    };

    if stats {
        eprintln!("Ingest stats: {}", report.ingest);
        eprintln!("Sweep stats: {}", report.sweep);
    }

    Ok(())
}

fn run_generate(
    output: PathBuf,
    count: u64,
    seed: u64,
    max_coord: i64,
    diagonal_frac: f64,
    point_frac: f64,
    max_len: i64,
) -> Result<(), DiagramError> {
    let config = GenerateConfig {
        count,
        seed,
        max_coord,
        diagonal_frac,
        point_frac,
        max_len,
    };
    let cmd = GenerateCommand::new(config);
    let stats = cmd.run(&output)?;
    eprintln!("Generated {}: {}", output.display(), stats);
    Ok(())
}
