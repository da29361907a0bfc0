//! Break accounting: home/away indicators, reified break literals, and the
//! global objective variable.
//!
//! A break is a pair of consecutive days on which a team plays at the same
//! venue. Each consecutive day pair gets a home-break and an away-break
//! conjunction literal; the break literal for the pair is their disjunction
//! (at most one conjunction can hold, so the disjunction is their maximum).

use pumpkin_solver::constraints as cp;
use pumpkin_solver::proof::ConstraintTag;
use pumpkin_solver::variables::{DomainId, Literal, TransformableVariable};
use pumpkin_solver::ConstraintOperationError;
use pumpkin_solver::Solver;

use crate::model::MatchVars;

/// Handles into the break layer of the model.
pub(crate) struct BreakModel {
    /// Sum of all per-team break counts; the minimization objective.
    pub(crate) global_breaks: DomainId,
}

/// Post the full break-accounting layer on top of the decision variables.
///
/// An error means posting hit a root-level conflict; the function returns
/// before creating any further variables on the now-inconsistent solver.
pub(crate) fn post_break_accounting(
    solver: &mut Solver,
    vars: &MatchVars,
    constraint_tag: ConstraintTag,
) -> Result<BreakModel, ConstraintOperationError> {
    let n = vars.num_teams();
    let days = vars.num_days();

    // is_home[t][d] / is_away[t][d] hold iff the team's match on day d is
    // at the corresponding venue.
    let mut is_home = vec![Vec::with_capacity(days); n];
    let mut is_away = vec![Vec::with_capacity(days); n];
    for team in 0..n {
        for day in 0..days {
            is_home[team].push(indicator(
                solver,
                vars.home_literals(team, day),
                constraint_tag,
            )?);
            is_away[team].push(indicator(
                solver,
                vars.away_literals(team, day),
                constraint_tag,
            )?);
        }
    }

    let mut team_totals = Vec::with_capacity(n);
    for team in 0..n {
        let mut breaks = Vec::with_capacity(days.saturating_sub(1));
        for day in 0..days.saturating_sub(1) {
            let home_break = reified_conjunction(
                solver,
                [is_home[team][day], is_home[team][day + 1]],
                constraint_tag,
            )?;
            let away_break = reified_conjunction(
                solver,
                [is_away[team][day], is_away[team][day + 1]],
                constraint_tag,
            )?;

            // break <-> home_break OR away_break
            let break_literal = solver.new_literal();
            solver
                .add_constraint(cp::clause(vec![home_break, away_break], constraint_tag))
                .reify(break_literal)?;
            breaks.push(break_literal);
        }

        let total = solver.new_bounded_integer(0, days.saturating_sub(1) as i32);
        let weights = vec![1; breaks.len()];
        solver
            .add_constraint(cp::boolean_equals(weights, breaks, total, constraint_tag))
            .post()?;
        team_totals.push(total);
    }

    let upper = (n * days.saturating_sub(1)) as i32;
    let global_breaks = solver.new_bounded_integer(0, upper);
    let mut terms: Vec<_> = team_totals.iter().map(|total| total.scaled(1)).collect();
    terms.push(global_breaks.scaled(-1));
    solver
        .add_constraint(cp::equals(terms, 0, constraint_tag))
        .post()?;

    Ok(BreakModel { global_breaks })
}

/// A fresh literal equal to the sum of `literals` (which hard constraints
/// force to be 0 or 1): `indicator == sum(literals)`.
fn indicator(
    solver: &mut Solver,
    literals: Vec<Literal>,
    constraint_tag: ConstraintTag,
) -> Result<Literal, ConstraintOperationError> {
    let ind = solver.new_literal();
    let mut terms: Vec<_> = literals
        .iter()
        .map(|literal| literal.get_integer_variable().scaled(1))
        .collect();
    terms.push(ind.get_integer_variable().scaled(-1));
    solver
        .add_constraint(cp::equals(terms, 0, constraint_tag))
        .post()?;
    Ok(ind)
}

/// A fresh literal equivalent to the conjunction of `literals`.
fn reified_conjunction(
    solver: &mut Solver,
    literals: [Literal; 2],
    constraint_tag: ConstraintTag,
) -> Result<Literal, ConstraintOperationError> {
    let conjunction = solver.new_literal();
    solver
        .add_constraint(cp::conjunction(literals.to_vec(), constraint_tag))
        .reify(conjunction)?;
    Ok(conjunction)
}
