//! Weekend schedule normalization.
//!
//! Raw schedule objects key sessions by identifiers that have drifted over
//! the API's lifetime ("qualy"/"quali"/"qualifying"). Each canonical slot
//! resolves the first alias present; slots missing a date or time are
//! dropped outright rather than defaulted.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::session::{Session, SessionKind};
use crate::utils::time::combine_date_time;

fn resolve_schedule_entry<'a>(schedule: &'a Value, kind: SessionKind) -> Option<&'a Value> {
    kind.aliases()
        .iter()
        .map(|alias| &schedule[*alias])
        .find(|entry| !entry.is_null())
}

fn parse_session(schedule: &Value, kind: SessionKind) -> Option<Session> {
    let entry = resolve_schedule_entry(schedule, kind)?;
    let date = combine_date_time(entry["date"].as_str(), entry["time"].as_str())?;
    Some(Session { kind, date })
}

/// Sessions of one weekend in canonical order, keeping only slots with a
/// parsable timestamp.
pub fn normalize_sessions(schedule: &Value) -> Vec<Session> {
    SessionKind::ORDER
        .iter()
        .filter_map(|&kind| parse_session(schedule, kind))
        .collect()
}

/// As [`normalize_sessions`], but when the schedule yields nothing and a
/// fallback timestamp exists, synthesize a lone Race session from it.
pub fn extract_sessions(race: &Value, fallback: Option<DateTime<Utc>>) -> Vec<Session> {
    let sessions = normalize_sessions(&race["schedule"]);
    if !sessions.is_empty() {
        return sessions;
    }
    match fallback {
        Some(date) => vec![Session {
            kind: SessionKind::Race,
            date,
        }],
        None => Vec::new(),
    }
}
