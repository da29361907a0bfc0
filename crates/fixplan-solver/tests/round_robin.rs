//! End-to-end solves of small leagues with fully open stadiums.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use fixplan_core::{FixtureScheduler, League, Schedule, SolveStatus, Stadium, Team};
use fixplan_solver::RoundRobinSolver;
use pretty_assertions::assert_eq;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn open_league(num_teams: usize, max_consecutive_away: u32) -> League {
    let teams = (0..num_teams)
        .map(|i| {
            Team::new(
                format!("Team {}", (b'A' + i as u8) as char),
                Arc::new(Stadium::new(format!("Stadium {}", i + 1))),
            )
        })
        .collect();
    League::new(teams, date(2025, 4, 1), max_consecutive_away).unwrap()
}

fn assert_valid_round_robin(schedule: &Schedule, league: &League) {
    let n = league.num_teams();
    assert_eq!(schedule.rounds.len(), n - 1);

    // Every round is a perfect matching over the teams.
    for round in &schedule.rounds {
        assert_eq!(round.matches.len(), n / 2);
        let mut seen = BTreeSet::new();
        for m in &round.matches {
            assert!(seen.insert(m.home.clone()), "{} plays twice", m.home);
            assert!(seen.insert(m.away.clone()), "{} plays twice", m.away);
        }
    }

    // Every unordered pair meets exactly once across all rounds.
    let mut pairs = BTreeSet::new();
    for round in &schedule.rounds {
        for m in &round.matches {
            let pair = if m.home < m.away {
                (m.home.clone(), m.away.clone())
            } else {
                (m.away.clone(), m.home.clone())
            };
            assert!(pairs.insert(pair), "{} vs {} meet twice", m.home, m.away);
        }
    }
    assert_eq!(pairs.len(), n * (n - 1) / 2);

    // Rounds carry consecutive calendar dates from the start date.
    for (day, round) in schedule.rounds.iter().enumerate() {
        assert_eq!(
            round.date,
            league.start_date() + chrono::Days::new(day as u64)
        );
    }
}

fn assert_away_runs_bounded(schedule: &Schedule, max_consecutive_away: u32) {
    for team in schedule.team_names() {
        let venues = schedule.venue_sequence(&team);
        let mut run = 0_u32;
        for venue in venues {
            if venue == fixplan_core::Venue::Away {
                run += 1;
                assert!(
                    run <= max_consecutive_away,
                    "{team} plays {run} consecutive away matches"
                );
            } else {
                run = 0;
            }
        }
    }
}

#[test]
fn four_teams_reaches_the_known_minimum() {
    let league = open_league(4, 2);
    let solver = RoundRobinSolver::with_time_budget(Duration::from_secs(60));

    let outcome = solver.solve(&league);

    assert_eq!(outcome.status, SolveStatus::Optimal);
    let schedule = outcome.schedule.expect("optimal outcome carries a schedule");
    assert_valid_round_robin(&schedule, &league);
    assert_away_runs_bounded(&schedule, 2);

    // The minimum break count for a single round robin on N teams is N - 2.
    assert_eq!(outcome.total_breaks, Some(2));
    assert_eq!(schedule.total_breaks(), 2);
}

#[test]
fn six_teams_reaches_the_known_minimum() {
    let league = open_league(6, 2);
    let solver = RoundRobinSolver::with_time_budget(Duration::from_secs(120));

    let outcome = solver.solve(&league);

    assert!(outcome.status.is_feasible(), "status: {}", outcome.status);
    let schedule = outcome.schedule.expect("feasible outcome carries a schedule");
    assert_valid_round_robin(&schedule, &league);
    assert_away_runs_bounded(&schedule, 2);

    // Objective and schedule scan agree regardless of proof status.
    assert_eq!(outcome.total_breaks, Some(schedule.total_breaks()));
    if outcome.status == SolveStatus::Optimal {
        assert_eq!(outcome.total_breaks, Some(4));
    }
}

#[test]
fn repeated_solves_agree_on_the_objective() {
    let league = open_league(4, 2);
    let solver = RoundRobinSolver::with_time_budget(Duration::from_secs(60));

    let first = solver.solve(&league);
    let second = solver.solve(&league);

    assert_eq!(first.status, SolveStatus::Optimal);
    assert_eq!(second.status, SolveStatus::Optimal);
    assert_eq!(first.total_breaks, second.total_breaks);
}
