use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::session::{Session, SessionKind};

/// One entry of a final race classification. Display fields keep whatever
/// text the API reported, with `"N/A"` standing in for anything unresolved.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub position: String,
    pub grid: String,
    pub points: String,
    pub driver: String,
    pub team: String,
    pub time: String,
    pub status: String,
}

impl ResultRow {
    /// Numeric sort key; rows without a parsable position sink to the bottom.
    pub fn position_rank(&self) -> u32 {
        self.position.parse().unwrap_or(u32::MAX)
    }

    /// Places gained (positive) or lost (negative) relative to the starting
    /// grid slot, when both sides are numeric.
    pub fn grid_delta(&self) -> Option<i64> {
        let grid: i64 = self.grid.parse().ok()?;
        let position: i64 = self.position.parse().ok()?;
        Some(grid - position)
    }
}

/// The most recently completed race with its classification and highlights.
#[derive(Debug, Clone, Serialize)]
pub struct LastRace {
    pub name: String,
    pub season: String,
    pub round: String,
    pub circuit_name: String,
    pub city: String,
    pub country: String,
    pub race_date: Option<DateTime<Utc>>,
    pub winner_name: String,
    pub winner_team: String,
    pub fastest_lap: String,
    pub fastest_driver: String,
    pub results: Vec<ResultRow>,
}

/// The upcoming race weekend with its usable session timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct NextRace {
    pub name: String,
    pub season: String,
    pub round: String,
    pub circuit_name: String,
    pub city: String,
    pub country: String,
    pub sessions: Vec<Session>,
}

impl NextRace {
    pub fn session(&self, kind: SessionKind) -> Option<&Session> {
        self.sessions.iter().find(|session| session.kind == kind)
    }

    /// Default countdown target: the race itself, else the first session.
    pub fn default_session(&self) -> Option<&Session> {
        self.session(SessionKind::Race).or_else(|| self.sessions.first())
    }
}

/// One calendar entry of a season race list.
#[derive(Debug, Clone, Serialize)]
pub struct RaceSummary {
    pub round: String,
    pub name: String,
    pub circuit_name: String,
    pub city: String,
    pub country: String,
    pub length: Option<String>,
    pub corners: Option<String>,
    pub laps: Option<String>,
    pub winner_name: Option<String>,
    pub team_winner_name: Option<String>,
    pub race_date: Option<DateTime<Utc>>,
    pub sessions: Vec<Session>,
}

impl RaceSummary {
    pub fn round_rank(&self) -> u32 {
        self.round.parse().unwrap_or(u32::MAX)
    }

    pub fn has_sprint(&self) -> bool {
        self.sessions
            .iter()
            .any(|session| session.kind == SessionKind::SprintRace)
    }
}

/// A full season race list in round order.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonCalendar {
    pub season: String,
    pub races: Vec<RaceSummary>,
}

impl SeasonCalendar {
    pub fn total(&self) -> usize {
        self.races.len()
    }
}

/// Aggregates derived from a season calendar plus entrant counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonInsights {
    pub countries: usize,
    pub teams: usize,
    pub drivers: usize,
    pub completed_races: usize,
    pub remaining_races: usize,
    pub sprint_weekends: usize,
    pub triple_headers: usize,
}

/// Entrant counts fetched from the championship tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntrantCounts {
    pub drivers: usize,
    pub teams: usize,
}

/// The soonest session still in the future, with its host race.
#[derive(Debug, Clone, Copy)]
pub struct NextEvent<'a> {
    pub race: &'a RaceSummary,
    pub session: &'a Session,
}
