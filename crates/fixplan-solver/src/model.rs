//! Decision-variable space and hard constraints.
//!
//! Stadium unavailability is modelled by variable absence: no decision
//! variable exists for a (host, guest, day) triple on which the host
//! stadium is closed, and the total lookup substitutes the constant false
//! into every sum that references such a triple. Infeasibility caused by
//! unavailability or by a tight away bound is never a panic: a root
//! conflict detected while posting propagates as a
//! [`ConstraintOperationError`], and everything else surfaces as a solver
//! status at solve time.

use std::collections::HashMap;

use fixplan_core::League;
use pumpkin_solver::constraints as cp;
use pumpkin_solver::proof::ConstraintTag;
use pumpkin_solver::variables::Literal;
use pumpkin_solver::ConstraintOperationError;
use pumpkin_solver::Solver;

/// The sparse decision-variable space: "team `host` hosts team `guest` on
/// day `day`".
pub(crate) struct MatchVars {
    num_teams: usize,
    num_days: usize,
    vars: HashMap<(usize, usize, usize), Literal>,
}

impl MatchVars {
    /// Create one literal per ordered team pair and day on which the host
    /// stadium is available.
    pub(crate) fn create(solver: &mut Solver, league: &League) -> Self {
        let horizon = league.horizon();
        let n = league.num_teams();

        let valid_days: Vec<Vec<usize>> = league
            .teams()
            .iter()
            .map(|team| {
                horizon
                    .days()
                    .filter(|&day| horizon.is_available(team.stadium(), day))
                    .collect()
            })
            .collect();

        let mut vars = HashMap::new();
        for host in 0..n {
            for guest in 0..n {
                if host == guest {
                    continue;
                }
                for &day in &valid_days[host] {
                    let _ = vars.insert((host, guest, day), solver.new_literal());
                }
            }
        }

        Self {
            num_teams: n,
            num_days: horizon.num_days(),
            vars,
        }
    }

    pub(crate) fn num_teams(&self) -> usize {
        self.num_teams
    }

    pub(crate) fn num_days(&self) -> usize {
        self.num_days
    }

    /// Total lookup: `None` means the host stadium is closed on that day
    /// and the triple contributes zero to every constraint sum.
    pub(crate) fn hosts(&self, host: usize, guest: usize, day: usize) -> Option<Literal> {
        self.vars.get(&(host, guest, day)).copied()
    }

    /// Existing literals for "team `team` plays at home on `day`"
    pub(crate) fn home_literals(&self, team: usize, day: usize) -> Vec<Literal> {
        (0..self.num_teams)
            .filter(|&opponent| opponent != team)
            .filter_map(|opponent| self.hosts(team, opponent, day))
            .collect()
    }

    /// Existing literals for "team `team` plays away on `day`"
    pub(crate) fn away_literals(&self, team: usize, day: usize) -> Vec<Literal> {
        (0..self.num_teams)
            .filter(|&opponent| opponent != team)
            .filter_map(|opponent| self.hosts(opponent, team, day))
            .collect()
    }
}

/// Post the three hard-constraint families of the round-robin model.
///
/// An error means posting hit a root-level conflict (the model is already
/// infeasible); no further variables or constraints may be created on the
/// solver afterwards.
pub(crate) fn post_hard_constraints(
    solver: &mut Solver,
    vars: &MatchVars,
    max_consecutive_away: u32,
    constraint_tag: ConstraintTag,
) -> Result<(), ConstraintOperationError> {
    let n = vars.num_teams();
    let days = vars.num_days();

    // Every unordered pair meets exactly once, hosted by either side.
    for i in 0..n {
        for j in (i + 1)..n {
            let literals: Vec<Literal> = (0..days)
                .flat_map(|day| [vars.hosts(i, j, day), vars.hosts(j, i, day)])
                .flatten()
                .collect();
            exactly_one(solver, &literals, constraint_tag)?;
        }
    }

    // Every team plays exactly one match per day, as host or visitor.
    for team in 0..n {
        for day in 0..days {
            let mut literals = vars.home_literals(team, day);
            literals.extend(vars.away_literals(team, day));
            exactly_one(solver, &literals, constraint_tag)?;
        }
    }

    // In every window of K + 1 consecutive days, at most K away matches.
    // A run of K + 1 consecutive away matches would push some window to
    // K + 1, so this bounds the longest away run to K.
    let k = max_consecutive_away as usize;
    for team in 0..n {
        for window_start in 0..days.saturating_sub(k) {
            let literals: Vec<Literal> = (window_start..=window_start + k)
                .flat_map(|day| vars.away_literals(team, day))
                .collect();
            let weights = vec![1; literals.len()];
            solver
                .add_constraint(cp::boolean_less_than_or_equals(
                    weights,
                    literals,
                    k as i32,
                    constraint_tag,
                ))
                .post()?;
        }
    }

    Ok(())
}

/// Post `sum(literals) == 1`.
///
/// An empty sum (a day on which no stadium can host) is a root-level
/// conflict and errors immediately.
fn exactly_one(
    solver: &mut Solver,
    literals: &[Literal],
    constraint_tag: ConstraintTag,
) -> Result<(), ConstraintOperationError> {
    let views: Vec<_> = literals
        .iter()
        .map(|literal| literal.get_integer_variable())
        .collect();
    solver
        .add_constraint(cp::equals(views, 1, constraint_tag))
        .post()
}
