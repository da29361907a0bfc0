//! Solve orchestration: model assembly, optimization, and schedule
//! reconstruction.

use std::time::Duration;

use fixplan_core::{
    FixtureScheduler, League, Match, Round, Schedule, SolveOutcome, SolveStatus,
};
use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::results::{OptimisationResult, ProblemSolution};
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::Solver;

use crate::breaks::{post_break_accounting, BreakModel};
use crate::model::{post_hard_constraints, MatchVars};

/// Time budget applied when none is configured explicitly.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(600);

/// Minimum-break round-robin scheduler backed by the Pumpkin CP solver.
///
/// Each call to [`FixtureScheduler::solve`] builds a fresh model; the
/// scheduler itself only carries configuration and is cheap to clone.
#[derive(Clone, Debug)]
pub struct RoundRobinSolver {
    time_budget: Duration,
}

impl RoundRobinSolver {
    pub fn new() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }

    /// Replace the default time budget.
    pub fn with_time_budget(time_budget: Duration) -> Self {
        Self { time_budget }
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }
}

impl Default for RoundRobinSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn noop_callback<B>(
    _solver: &Solver,
    _solution: pumpkin_solver::results::SolutionReference,
    _brancher: &B,
) {
}

impl FixtureScheduler for RoundRobinSolver {
    fn solve(&self, league: &League) -> SolveOutcome {
        let mut solver = Solver::default();
        let constraint_tag = solver.new_constraint_tag();

        let vars = MatchVars::create(&mut solver, league);

        // A posting error is a root-level conflict: the model is proven
        // infeasible before search even starts, and the solver must not be
        // touched further.
        if post_hard_constraints(
            &mut solver,
            &vars,
            league.max_consecutive_away(),
            constraint_tag,
        )
        .is_err()
        {
            return infeasible();
        }
        let break_model = match post_break_accounting(&mut solver, &vars, constraint_tag) {
            Ok(break_model) => break_model,
            Err(_) => return infeasible(),
        };

        let mut brancher = solver.default_brancher();
        let mut termination = TimeBudget::starting_now(self.time_budget);
        let objective = LinearSatUnsat::new(
            OptimisationDirection::Minimise,
            break_model.global_breaks,
            noop_callback,
        );

        match solver.optimise(&mut brancher, &mut termination, objective) {
            OptimisationResult::Optimal(solution) => {
                assemble(SolveStatus::Optimal, &solution, league, &vars, &break_model)
            }
            OptimisationResult::Satisfiable(solution) => {
                assemble(SolveStatus::Feasible, &solution, league, &vars, &break_model)
            }
            OptimisationResult::Unsatisfiable => infeasible(),
            OptimisationResult::Unknown => SolveOutcome {
                status: SolveStatus::Unknown,
                schedule: None,
                total_breaks: None,
            },
        }
    }
}

fn infeasible() -> SolveOutcome {
    SolveOutcome {
        status: SolveStatus::Infeasible,
        schedule: None,
        total_breaks: None,
    }
}

fn assemble<S: ProblemSolution>(
    status: SolveStatus,
    solution: &S,
    league: &League,
    vars: &MatchVars,
    break_model: &BreakModel,
) -> SolveOutcome {
    let schedule = reconstruct_schedule(solution, league, vars);
    let total_breaks = solution.get_integer_value(break_model.global_breaks) as u32;
    SolveOutcome {
        status,
        schedule: Some(schedule),
        total_breaks: Some(total_breaks),
    }
}

/// Read the final assignment back into a calendar-dated fixture list.
fn reconstruct_schedule<S: ProblemSolution>(
    solution: &S,
    league: &League,
    vars: &MatchVars,
) -> Schedule {
    let horizon = league.horizon();
    let teams = league.teams();
    let n = league.num_teams();

    let rounds = horizon
        .days()
        .map(|day| {
            let mut matches = Vec::with_capacity(n / 2);
            for host in 0..n {
                for guest in 0..n {
                    if host == guest {
                        continue;
                    }
                    if let Some(literal) = vars.hosts(host, guest, day) {
                        if solution.get_literal_value(literal) {
                            matches.push(Match {
                                home: teams[host].name().to_owned(),
                                away: teams[guest].name().to_owned(),
                            });
                        }
                    }
                }
            }
            Round {
                date: horizon.date_of(day),
                matches,
            }
        })
        .collect();

    Schedule { rounds }
}
