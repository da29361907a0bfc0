//! League input files.
//!
//! A league file is a JSON document listing the teams, their stadiums with
//! optional unavailable dates, the start date, and the away bound:
//!
//! ```json
//! {
//!   "start_date": "2025-04-01",
//!   "max_consecutive_away": 2,
//!   "teams": [
//!     {
//!       "name": "Team A",
//!       "stadium": { "name": "Stadium 1", "unavailable": ["2025-04-03"] }
//!     }
//!   ]
//! }
//! ```
//!
//! Unavailable entries may be dates, datetimes (the time is dropped), or
//! arbitrary text; unparseable text is kept as a warning and does not block
//! the stadium.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fixplan_core::{League, Stadium, Team};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LeagueFile {
    pub start_date: NaiveDate,
    pub max_consecutive_away: u32,
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    pub stadium: StadiumEntry,
}

#[derive(Debug, Deserialize)]
pub struct StadiumEntry {
    pub name: String,
    #[serde(default)]
    pub unavailable: Vec<String>,
}

/// Read and validate a league file.
pub fn load_league(path: &Path) -> Result<League> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading league file {}", path.display()))?;
    let file: LeagueFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing league file {}", path.display()))?;

    let teams: Vec<Team> = file
        .teams
        .into_iter()
        .map(|entry| {
            let stadium = Stadium::with_unavailable(entry.stadium.name, entry.stadium.unavailable);
            for rejected in stadium.rejected_entries() {
                tracing::warn!(
                    stadium = stadium.name(),
                    entry = rejected,
                    "ignoring unparseable unavailable date"
                );
            }
            Team::new(entry.name, Arc::new(stadium))
        })
        .collect();

    let league = League::new(teams, file.start_date, file.max_consecutive_away)
        .with_context(|| format!("validating league file {}", path.display()))?;
    Ok(league)
}
