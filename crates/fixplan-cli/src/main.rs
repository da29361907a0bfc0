//! fixplan CLI - Round-Robin Fixture Scheduler
//!
//! Command-line interface for solving and benchmarking minimum-break
//! single round-robin fixtures.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fixplan_core::{FixtureScheduler, SolveOutcome};
use fixplan_solver::RoundRobinSolver;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod bench;
mod input;

#[derive(Parser)]
#[command(name = "fixplan")]
#[command(author, version, about = "Minimum-break round-robin fixture scheduler", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a league file
    Solve {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Solver time budget in seconds
        #[arg(short, long, default_value_t = 600)]
        time_budget: u64,
    },

    /// Benchmark synthetic leagues of increasing size
    Bench {
        /// Comma-separated league sizes
        #[arg(short, long, default_value = "6,8,10,12,14,16,18,20", value_delimiter = ',')]
        sizes: Vec<usize>,

        /// Tournament start date
        #[arg(long, default_value = "2025-04-01")]
        start_date: NaiveDate,

        /// Maximum consecutive away matches
        #[arg(long, default_value_t = 2)]
        max_away: u32,

        /// Solver time budget per league, in seconds
        #[arg(short, long, default_value_t = 600)]
        time_budget: u64,

        /// Write the report as a markdown table to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Solve {
            file,
            format,
            time_budget,
        }) => {
            let league = input::load_league(&file)?;
            tracing::info!(
                num_teams = league.num_teams(),
                max_consecutive_away = league.max_consecutive_away(),
                "solving league"
            );

            let solver = RoundRobinSolver::with_time_budget(Duration::from_secs(time_budget));
            let outcome = solver.solve(&league);

            match format.as_str() {
                "text" => print_outcome(&outcome),
                "json" => {
                    let json = serde_json::to_string_pretty(&outcome)
                        .context("serializing solve outcome")?;
                    println!("{json}");
                }
                other => bail!("unknown output format '{other}' (expected text or json)"),
            }
        }
        Some(Commands::Bench {
            sizes,
            start_date,
            max_away,
            time_budget,
            output,
        }) => {
            let budget = Duration::from_secs(time_budget);
            let results = bench::run_benchmark_series(&sizes, start_date, max_away, budget)?;
            bench::print_report(&results);
            if let Some(path) = output {
                bench::write_report(&results, &path)?;
                println!("Report written to {}", path.display());
            }
        }
        None => {
            println!("fixplan - Round-Robin Fixture Scheduler");
            println!("Run with --help for usage information");
        }
    }

    Ok(())
}

fn print_outcome(outcome: &SolveOutcome) {
    println!("Status: {}", outcome.status);
    if let Some(breaks) = outcome.total_breaks {
        println!("Total breaks: {breaks}");
    }
    let Some(schedule) = &outcome.schedule else {
        return;
    };
    for round in &schedule.rounds {
        println!();
        println!("{}", round.date);
        for m in &round.matches {
            println!("  {} vs {}", m.home, m.away);
        }
    }
}
