//! # fixplan-solver
//!
//! Constraint-programming formulation of the minimum-break single
//! round-robin problem, solved with the Pumpkin CP solver.
//!
//! The model follows the classic encoding:
//!
//! - One boolean decision variable per (host, guest, day) triple, created
//!   only where the host stadium is available that day
//! - Hard constraints: every pair meets exactly once, every team plays
//!   exactly one match per day, and no team plays more than K consecutive
//!   away matches
//! - Derived home/away indicators per team-day and reified break
//!   indicators per consecutive day pair, aggregated into a global
//!   break count that is minimized
//!
//! Search is delegated entirely to the solver; this crate only assembles
//! the model and interprets the resulting assignment.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fixplan_core::FixtureScheduler;
//! use fixplan_solver::RoundRobinSolver;
//!
//! let solver = RoundRobinSolver::new();
//! let outcome = solver.solve(&league);
//! if let Some(schedule) = outcome.schedule {
//!     println!("breaks: {}", schedule.total_breaks());
//! }
//! ```

mod breaks;
mod model;
mod solve;

pub use solve::{RoundRobinSolver, DEFAULT_TIME_BUDGET};
