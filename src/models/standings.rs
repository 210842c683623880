use serde::Serialize;

/// Which championship table a standings view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StandingsMode {
    Drivers,
    Constructors,
}

impl StandingsMode {
    pub fn title(self) -> &'static str {
        match self {
            StandingsMode::Drivers => "drivers championship",
            StandingsMode::Constructors => "constructors championship",
        }
    }

    /// JSON key holding the raw table in the championship payload.
    pub fn payload_key(self) -> &'static str {
        match self {
            StandingsMode::Drivers => "drivers_championship",
            StandingsMode::Constructors => "constructors_championship",
        }
    }

    pub fn main_column(self) -> &'static str {
        match self {
            StandingsMode::Drivers => "Driver",
            StandingsMode::Constructors => "Constructor",
        }
    }

    pub fn secondary_column(self) -> &'static str {
        match self {
            StandingsMode::Drivers => "Team",
            StandingsMode::Constructors => "Country",
        }
    }

    pub fn detail_kind(self) -> DetailKind {
        match self {
            StandingsMode::Drivers => DetailKind::Drivers,
            StandingsMode::Constructors => DetailKind::Teams,
        }
    }
}

/// Profile endpoint family for detail lookups, also the cache key namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DetailKind {
    Drivers,
    Teams,
}

impl DetailKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            DetailKind::Drivers => "drivers",
            DetailKind::Teams => "teams",
        }
    }
}

/// One ranked championship entrant.
#[derive(Debug, Clone, Serialize)]
pub struct StandingsRow {
    pub position: u32,
    /// Driver or constructor display name.
    pub main: String,
    /// Team name for drivers, country for constructors.
    pub secondary: String,
    pub points: f64,
    pub wins: u32,
    /// Leader's points minus this row's points; 0 for the leader itself.
    pub gap: f64,
    /// Id usable against the detail endpoint, when the API reported one.
    pub detail_id: Option<String>,
}

/// A normalized championship table, rows sorted ascending by position.
#[derive(Debug, Clone, Serialize)]
pub struct StandingsTable {
    pub mode: StandingsMode,
    pub season: String,
    pub championship_id: String,
    pub rows: Vec<StandingsRow>,
}

impl StandingsTable {
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// Entity with the most wins, for the NFO header line.
    pub fn top_winner(&self) -> Option<&StandingsRow> {
        let top_wins = self.rows.iter().map(|row| row.wins).max()?;
        self.rows.iter().find(|row| row.wins == top_wins)
    }
}
