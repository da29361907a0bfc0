//! # fixplan-core
//!
//! Core domain model for the fixplan round-robin fixture scheduler.
//!
//! This crate provides:
//! - Domain types: `Team`, `Stadium`, `Horizon`, `League`, `Schedule`
//! - Solve outcome types: `SolveStatus`, `SolveOutcome`
//! - The `FixtureScheduler` trait implemented by solver backends
//! - Error types for league validation
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//! use fixplan_core::{League, Stadium, Team};
//!
//! let teams: Vec<Team> = (0..4)
//!     .map(|i| {
//!         let stadium = Arc::new(Stadium::new(format!("Stadium {}", i + 1)));
//!         Team::new(format!("Team {}", i + 1), stadium)
//!     })
//!     .collect();
//!
//! let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
//! let league = League::new(teams, start, 2).unwrap();
//! assert_eq!(league.horizon().num_days(), 3);
//! ```

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// A team name, also used as the match participant identifier in schedules
pub type TeamName = String;

// ============================================================================
// Stadium
// ============================================================================

/// A date given in one of the input representations accepted for stadium
/// unavailability lists.
///
/// Construction from league files mixes date-only values, timestamps, and
/// ISO-formatted text; all are normalized to a date-only set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateSpec {
    /// A calendar date
    Date(NaiveDate),
    /// A timestamp; the time-of-day component is discarded
    DateTime(NaiveDateTime),
    /// ISO-8601 text, either `YYYY-MM-DD` or a full timestamp
    Text(String),
}

impl From<NaiveDate> for DateSpec {
    fn from(date: NaiveDate) -> Self {
        DateSpec::Date(date)
    }
}

impl From<NaiveDateTime> for DateSpec {
    fn from(datetime: NaiveDateTime) -> Self {
        DateSpec::DateTime(datetime)
    }
}

impl From<&str> for DateSpec {
    fn from(text: &str) -> Self {
        DateSpec::Text(text.to_owned())
    }
}

impl From<String> for DateSpec {
    fn from(text: String) -> Self {
        DateSpec::Text(text)
    }
}

impl DateSpec {
    /// Normalize to a date-only value. Returns `None` for unparseable text.
    fn normalize(&self) -> Option<NaiveDate> {
        match self {
            DateSpec::Date(date) => Some(*date),
            DateSpec::DateTime(datetime) => Some(datetime.date()),
            DateSpec::Text(text) => text
                .parse::<NaiveDate>()
                .ok()
                .or_else(|| text.parse::<NaiveDateTime>().ok().map(|dt| dt.date())),
        }
    }
}

/// A stadium with a set of calendar dates on which it cannot host a match.
///
/// Immutable after construction. The unavailable-date set is normalized from
/// mixed input representations at construction time; text entries that fail
/// to parse do not abort construction and are kept as warnings instead (see
/// [`Stadium::rejected_entries`]).
#[derive(Clone, Debug)]
pub struct Stadium {
    name: String,
    unavailable: BTreeSet<NaiveDate>,
    rejected: Vec<String>,
}

impl Stadium {
    /// Create a stadium that is available on every date
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unavailable: BTreeSet::new(),
            rejected: Vec::new(),
        }
    }

    /// Create a stadium with the given unavailable-date entries.
    ///
    /// Entries are normalized to date-only values. Entries that cannot be
    /// interpreted are recorded in [`Stadium::rejected_entries`] rather than
    /// failing the whole construction.
    pub fn with_unavailable<I, S>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DateSpec>,
    {
        let mut unavailable = BTreeSet::new();
        let mut rejected = Vec::new();

        for entry in entries {
            let spec = entry.into();
            match spec.normalize() {
                Some(date) => {
                    let _ = unavailable.insert(date);
                }
                None => {
                    let DateSpec::Text(text) = spec else {
                        unreachable!("only text entries can fail to normalize")
                    };
                    rejected.push(text);
                }
            }
        }

        Self {
            name: name.into(),
            unavailable,
            rejected,
        }
    }

    /// Stadium name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the stadium can host a match on the given date
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        !self.unavailable.contains(&date)
    }

    /// The normalized unavailable-date set
    pub fn unavailable_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.unavailable.iter().copied()
    }

    /// Input entries that could not be interpreted as dates.
    ///
    /// Callers decide how to surface these; the CLI logs a warning per entry.
    pub fn rejected_entries(&self) -> &[String] {
        &self.rejected
    }
}

// ============================================================================
// Team
// ============================================================================

/// A league participant bound to its home stadium.
///
/// The stadium is shared, not exclusively owned; several teams may reference
/// the same stadium object.
#[derive(Clone, Debug)]
pub struct Team {
    name: TeamName,
    stadium: Arc<Stadium>,
}

impl Team {
    pub fn new(name: impl Into<TeamName>, stadium: Arc<Stadium>) -> Self {
        Self {
            name: name.into(),
            stadium,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stadium(&self) -> &Stadium {
        &self.stadium
    }
}

// ============================================================================
// Horizon (Calendar Model)
// ============================================================================

/// The tournament day horizon: a start date and a fixed number of match days.
///
/// A single round-robin among N teams needs N − 1 days; day indices are
/// zero-based offsets from the start date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Horizon {
    start: NaiveDate,
    num_days: usize,
}

impl Horizon {
    /// The horizon for a league of `num_teams` teams starting on `start`
    pub fn for_league(start: NaiveDate, num_teams: usize) -> Self {
        Self {
            start,
            num_days: num_teams.saturating_sub(1),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }

    /// Calendar date of the given zero-based day index
    pub fn date_of(&self, day: usize) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(day as u64))
            .expect("tournament horizon exceeds the calendar range")
    }

    /// Iterate over the day indices of the horizon
    pub fn days(&self) -> std::ops::Range<usize> {
        0..self.num_days
    }

    /// Whether the stadium can host on the given day index
    pub fn is_available(&self, stadium: &Stadium, day: usize) -> bool {
        stadium.is_available_on(self.date_of(day))
    }
}

// ============================================================================
// League
// ============================================================================

/// A validated league definition: the input to a fixture solve.
///
/// Validation happens once, at construction; a `League` value always
/// satisfies N ≥ 2 and 0 ≤ K < N − 1.
#[derive(Clone, Debug)]
pub struct League {
    teams: Vec<Team>,
    start_date: NaiveDate,
    max_consecutive_away: u32,
}

impl League {
    /// Create a league, failing fast on contract violations.
    ///
    /// `max_consecutive_away` is the bound K on consecutive away matches;
    /// it must satisfy K < N − 1.
    pub fn new(
        teams: Vec<Team>,
        start_date: NaiveDate,
        max_consecutive_away: u32,
    ) -> Result<Self, ConfigError> {
        if teams.len() < 2 {
            return Err(ConfigError::TooFewTeams { count: teams.len() });
        }
        if max_consecutive_away as usize >= teams.len() - 1 {
            return Err(ConfigError::MaxAwayOutOfRange {
                max_away: max_consecutive_away,
                num_teams: teams.len(),
            });
        }
        Ok(Self {
            teams,
            start_date,
            max_consecutive_away,
        })
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn num_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn max_consecutive_away(&self) -> u32 {
        self.max_consecutive_away
    }

    pub fn horizon(&self) -> Horizon {
        Horizon::for_league(self.start_date, self.teams.len())
    }
}

// ============================================================================
// Schedule (Result)
// ============================================================================

/// Venue type of a match from one team's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

/// A single match: an ordered (host, visitor) pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub home: TeamName,
    pub away: TeamName,
}

/// All matches of one tournament day
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Calendar date of this day
    pub date: NaiveDate,
    pub matches: Vec<Match>,
}

/// A complete fixture list: one round per tournament day, in day order.
///
/// Produced once from the solver's final assignment and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub rounds: Vec<Round>,
}

impl Schedule {
    /// Names of all teams appearing in the schedule, sorted
    pub fn team_names(&self) -> Vec<TeamName> {
        let mut names = BTreeSet::new();
        for round in &self.rounds {
            for m in &round.matches {
                let _ = names.insert(m.home.clone());
                let _ = names.insert(m.away.clone());
            }
        }
        names.into_iter().collect()
    }

    /// The team's venue on each day, in day order.
    ///
    /// Days on which the team does not appear are skipped; in a valid
    /// round-robin schedule every team appears on every day.
    pub fn venue_sequence(&self, team: &str) -> Vec<Venue> {
        self.rounds
            .iter()
            .filter_map(|round| {
                round.matches.iter().find_map(|m| {
                    if m.home == team {
                        Some(Venue::Home)
                    } else if m.away == team {
                        Some(Venue::Away)
                    } else {
                        None
                    }
                })
            })
            .collect()
    }

    /// Number of breaks (consecutive same-venue match pairs) for one team
    pub fn breaks_for_team(&self, team: &str) -> u32 {
        self.venue_sequence(team)
            .windows(2)
            .filter(|pair| pair[0] == pair[1])
            .count() as u32
    }

    /// Total breaks across all teams, computed by scanning the schedule.
    ///
    /// For a schedule reconstructed from a solve, this equals the objective
    /// value reported by the solver.
    pub fn total_breaks(&self) -> u32 {
        self.team_names()
            .iter()
            .map(|team| self.breaks_for_team(team))
            .sum()
    }
}

// ============================================================================
// Solve Outcome
// ============================================================================

/// Terminal status of a solve attempt.
///
/// Infeasibility and timeout are routine outcomes in this domain and are
/// reported as data, never as errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// A schedule was found and proven to minimize total breaks
    Optimal,
    /// A schedule was found but optimality was not proven within the budget
    Feasible,
    /// No schedule satisfies the hard constraints
    Infeasible,
    /// The time budget expired before any schedule was found
    Unknown,
}

impl SolveStatus {
    /// Whether a schedule accompanies this status
    pub fn is_feasible(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Feasible => write!(f, "Feasible"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// The result of one solve invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// The reconstructed fixture list, present iff the status is feasible
    pub schedule: Option<Schedule>,
    /// The achieved total-breaks objective, present iff a schedule is
    pub total_breaks: Option<u32>,
}

// ============================================================================
// Traits
// ============================================================================

/// A fixture scheduling backend.
///
/// Implementations assemble a constraint model for the league and hand it to
/// a solver; all solver-level outcomes (including infeasibility and timeout)
/// are returned as a [`SolveOutcome`], never as an error.
pub trait FixtureScheduler {
    fn solve(&self, league: &League) -> SolveOutcome;
}

// ============================================================================
// Errors
// ============================================================================

/// League validation error, raised before any model assembly
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a league needs at least two teams, got {count}")]
    TooFewTeams { count: usize },

    #[error(
        "max consecutive away matches ({max_away}) must be less than N - 1 \
         for a league of {num_teams} teams"
    )]
    MaxAwayOutOfRange { max_away: u32, num_teams: usize },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn league_of(n: usize, max_away: u32) -> League {
        let teams = (0..n)
            .map(|i| {
                let stadium = Arc::new(Stadium::new(format!("Stadium {}", i + 1)));
                Team::new(format!("Team {}", i + 1), stadium)
            })
            .collect();
        League::new(teams, date(2025, 4, 1), max_away).unwrap()
    }

    #[test]
    fn stadium_normalizes_mixed_entries() {
        let evening = date(2025, 4, 3).and_hms_opt(18, 30, 0).unwrap();
        let stadium = Stadium::with_unavailable(
            "Arena",
            vec![
                DateSpec::from("2025-04-02"),
                DateSpec::from(evening),
                DateSpec::from(date(2025, 4, 2)),
                DateSpec::from("2025-04-05T20:00:00"),
            ],
        );

        let dates: Vec<NaiveDate> = stadium.unavailable_dates().collect();
        assert_eq!(
            dates,
            vec![date(2025, 4, 2), date(2025, 4, 3), date(2025, 4, 5)]
        );
        assert!(stadium.rejected_entries().is_empty());
    }

    #[test]
    fn stadium_keeps_unparseable_entries_as_warnings() {
        let stadium =
            Stadium::with_unavailable("Arena", vec!["2025-04-02", "not a date", "04/02/2025"]);

        assert_eq!(stadium.unavailable_dates().count(), 1);
        assert_eq!(
            stadium.rejected_entries(),
            &["not a date".to_owned(), "04/02/2025".to_owned()]
        );
    }

    #[test]
    fn stadium_availability_query() {
        let stadium = Stadium::with_unavailable("Arena", vec!["2025-04-02"]);
        assert!(stadium.is_available_on(date(2025, 4, 1)));
        assert!(!stadium.is_available_on(date(2025, 4, 2)));
    }

    #[test]
    fn horizon_day_arithmetic() {
        let horizon = Horizon::for_league(date(2025, 4, 1), 6);
        assert_eq!(horizon.num_days(), 5);
        assert_eq!(horizon.date_of(0), date(2025, 4, 1));
        assert_eq!(horizon.date_of(4), date(2025, 4, 5));
        assert_eq!(horizon.days().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn horizon_checks_stadium_availability() {
        let stadium = Stadium::with_unavailable("Arena", vec!["2025-04-03"]);
        let horizon = Horizon::for_league(date(2025, 4, 1), 4);
        assert!(horizon.is_available(&stadium, 0));
        assert!(!horizon.is_available(&stadium, 2));
    }

    #[test]
    fn league_rejects_too_few_teams() {
        let stadium = Arc::new(Stadium::new("Arena"));
        let teams = vec![Team::new("Solo", stadium)];
        let err = League::new(teams, date(2025, 4, 1), 0).unwrap_err();
        assert_eq!(err, ConfigError::TooFewTeams { count: 1 });
    }

    #[test]
    fn league_rejects_out_of_range_max_away() {
        let teams = (0..4)
            .map(|i| Team::new(format!("T{i}"), Arc::new(Stadium::new(format!("S{i}")))))
            .collect::<Vec<_>>();
        let err = League::new(teams, date(2025, 4, 1), 3).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MaxAwayOutOfRange {
                max_away: 3,
                num_teams: 4
            }
        );
    }

    #[test]
    fn league_horizon_spans_n_minus_one_days() {
        let league = league_of(6, 2);
        assert_eq!(league.horizon().num_days(), 5);
        assert_eq!(league.horizon().start_date(), date(2025, 4, 1));
    }

    #[test]
    fn teams_may_share_a_stadium() {
        let shared = Arc::new(Stadium::new("Shared Arena"));
        let a = Team::new("A", Arc::clone(&shared));
        let b = Team::new("B", shared);
        assert_eq!(a.stadium().name(), b.stadium().name());
    }

    #[test]
    fn schedule_break_scan() {
        // Team 1: home, home, away  -> 1 break
        // Team 2: away, home, home  -> 1 break
        // Team 3: home, away, away  -> 1 break
        // Team 4: away, away, home  -> 1 break
        let schedule = Schedule {
            rounds: vec![
                Round {
                    date: date(2025, 4, 1),
                    matches: vec![
                        Match { home: "Team 1".into(), away: "Team 2".into() },
                        Match { home: "Team 3".into(), away: "Team 4".into() },
                    ],
                },
                Round {
                    date: date(2025, 4, 2),
                    matches: vec![
                        Match { home: "Team 1".into(), away: "Team 4".into() },
                        Match { home: "Team 2".into(), away: "Team 3".into() },
                    ],
                },
                Round {
                    date: date(2025, 4, 3),
                    matches: vec![
                        Match { home: "Team 2".into(), away: "Team 1".into() },
                        Match { home: "Team 4".into(), away: "Team 3".into() },
                    ],
                },
            ],
        };

        assert_eq!(schedule.venue_sequence("Team 1"), vec![Venue::Home, Venue::Home, Venue::Away]);
        assert_eq!(schedule.breaks_for_team("Team 1"), 1);
        assert_eq!(schedule.breaks_for_team("Team 2"), 1);
        assert_eq!(schedule.total_breaks(), 4);
    }

    #[test]
    fn schedule_serializes_to_json() {
        let schedule = Schedule {
            rounds: vec![Round {
                date: date(2025, 4, 1),
                matches: vec![Match { home: "A".into(), away: "B".into() }],
            }],
        };
        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }
}
