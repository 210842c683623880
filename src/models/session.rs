use chrono::{DateTime, Utc};
use serde::Serialize;

/// Canonical session slots of a race weekend, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionKind {
    Race,
    Qualifying,
    Practice1,
    Practice2,
    Practice3,
    SprintQualifying,
    SprintRace,
}

impl SessionKind {
    pub const ORDER: [SessionKind; 7] = [
        SessionKind::Race,
        SessionKind::Qualifying,
        SessionKind::Practice1,
        SessionKind::Practice2,
        SessionKind::Practice3,
        SessionKind::SprintQualifying,
        SessionKind::SprintRace,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Race => "Race",
            SessionKind::Qualifying => "Qualy",
            SessionKind::Practice1 => "FP1",
            SessionKind::Practice2 => "FP2",
            SessionKind::Practice3 => "FP3",
            SessionKind::SprintQualifying => "Sprint Qualy",
            SessionKind::SprintRace => "Sprint Race",
        }
    }

    /// Schedule keys the API has used for this slot over time. The first
    /// alias present in a raw schedule object wins.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            SessionKind::Race => &["race"],
            SessionKind::Qualifying => &["qualy", "quali", "qualifying"],
            SessionKind::Practice1 => &["fp1"],
            SessionKind::Practice2 => &["fp2"],
            SessionKind::Practice3 => &["fp3"],
            SessionKind::SprintQualifying => &["sprintQualy", "sprint_qualy", "sprintQualifying"],
            SessionKind::SprintRace => &["sprintRace", "sprint_race", "sprint"],
        }
    }
}

/// A single timed event within a race weekend.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub kind: SessionKind,
    pub date: DateTime<Utc>,
}

impl Session {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}
