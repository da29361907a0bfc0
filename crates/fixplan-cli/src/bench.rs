//! Benchmarking module for fixplan
//!
//! Runs the solver over a series of synthetic leagues of increasing size and
//! reports solve time, status, and the achieved break count per size.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fixplan_core::{FixtureScheduler, League, SolveStatus, Stadium, Team};
use fixplan_solver::RoundRobinSolver;
use std::sync::Arc;

/// Result of one benchmark run
#[derive(Debug)]
pub struct BenchmarkResult {
    pub num_teams: usize,
    pub solve_time: Duration,
    pub status: SolveStatus,
    pub total_breaks: Option<u32>,
}

/// Build a league of `num_teams` teams with fully open stadiums.
///
/// Teams are named "Team A", "Team B", ... for the first 26 and
/// "Team 27" onward; stadiums are numbered.
pub fn synthetic_league(
    num_teams: usize,
    start_date: NaiveDate,
    max_consecutive_away: u32,
) -> Result<League> {
    let teams = (0..num_teams)
        .map(|i| {
            let name = if i < 26 {
                format!("Team {}", (b'A' + i as u8) as char)
            } else {
                format!("Team {}", i + 1)
            };
            Team::new(name, Arc::new(Stadium::new(format!("Stadium {}", i + 1))))
        })
        .collect();
    let league = League::new(teams, start_date, max_consecutive_away)
        .with_context(|| format!("building synthetic league of {num_teams} teams"))?;
    Ok(league)
}

/// Run one benchmark solve
pub fn run_benchmark(league: &League, time_budget: Duration) -> BenchmarkResult {
    let solver = RoundRobinSolver::with_time_budget(time_budget);

    let solve_start = Instant::now();
    let outcome = solver.solve(league);
    let solve_time = solve_start.elapsed();

    BenchmarkResult {
        num_teams: league.num_teams(),
        solve_time,
        status: outcome.status,
        total_breaks: outcome.total_breaks,
    }
}

/// Run a series of benchmarks with increasing league sizes
pub fn run_benchmark_series(
    sizes: &[usize],
    start_date: NaiveDate,
    max_consecutive_away: u32,
    time_budget: Duration,
) -> Result<Vec<BenchmarkResult>> {
    sizes
        .iter()
        .map(|&size| {
            println!("  Running league with {} teams...", size);
            let league = synthetic_league(size, start_date, max_consecutive_away)?;
            Ok(run_benchmark(&league, time_budget))
        })
        .collect()
}

/// Print a formatted benchmark report
pub fn print_report(results: &[BenchmarkResult]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                 fixplan Benchmark Report                 ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!(
        "║ {:^8} │ {:^14} │ {:^12} │ {:^12} ║",
        "Teams", "Solve", "Status", "Breaks"
    );
    println!("╠══════════════════════════════════════════════════════════╣");

    for result in results {
        let solve_s = format!("{:.3}s", result.solve_time.as_secs_f64());
        let breaks = result
            .total_breaks
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "║ {:>8} │ {:>14} │ {:^12} │ {:>12} ║",
            result.num_teams, solve_s, result.status, breaks
        );
    }

    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let proven: Vec<_> = results
        .iter()
        .filter(|r| r.status == SolveStatus::Optimal)
        .collect();
    println!("Summary:");
    println!("  Proven optimal: {}/{}", proven.len(), results.len());
    let solved = results.iter().filter(|r| r.status.is_feasible()).count();
    println!("  Schedules found: {}/{}", solved, results.len());
}

/// Render the results as a markdown table
pub fn to_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| num_teams | solve_time_sec | status | total_breaks |\n");
    out.push_str("|---|---|---|---|\n");
    for result in results {
        let breaks = result
            .total_breaks
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "| {} | {:.3} | {} | {} |\n",
            result.num_teams,
            result.solve_time.as_secs_f64(),
            result.status,
            breaks
        ));
    }
    out
}

/// Write the markdown report to a file
pub fn write_report(results: &[BenchmarkResult], path: &Path) -> Result<()> {
    std::fs::write(path, to_markdown(results))
        .with_context(|| format!("writing benchmark report to {}", path.display()))?;
    Ok(())
}
