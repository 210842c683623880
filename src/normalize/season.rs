//! Season calendar normalization and derived insights.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde_json::Value;
use std::collections::HashSet;

use crate::models::race::{EntrantCounts, NextEvent, RaceSummary, SeasonCalendar, SeasonInsights};
use crate::models::session::SessionKind;
use crate::normalize::race::format_driver_name;
use crate::normalize::schedule::normalize_sessions;
use crate::utils::resolve::{display_text, resolve_or_na, resolve_text};

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;
const TRIPLE_HEADER_TOLERANCE_MS: i64 = 2 * 24 * 60 * 60 * 1000;

/// Winner fields arrive either as objects or as bare strings depending on
/// the endpoint's age.
fn winner_name(value: &Value) -> Option<String> {
    if value.is_object() {
        let name = format_driver_name(value);
        return (name != "N/A").then_some(name);
    }
    display_text(value)
}

fn team_winner_name(value: &Value) -> Option<String> {
    if value.is_object() {
        return resolve_text(&[&value["teamName"], &value["name"]]);
    }
    display_text(value)
}

fn normalize_race_summary(race: &Value) -> RaceSummary {
    let sessions = normalize_sessions(&race["schedule"]);
    // The race session anchors the calendar date; any session beats none.
    let race_date = sessions
        .iter()
        .find(|session| session.kind == SessionKind::Race)
        .or_else(|| sessions.first())
        .map(|session| session.date);

    RaceSummary {
        round: resolve_or_na(&[&race["round"]]),
        name: resolve_or_na(&[&race["raceName"], &race["name"]]),
        circuit_name: resolve_or_na(&[&race["circuit"]["circuitName"]]),
        city: resolve_or_na(&[&race["circuit"]["city"]]),
        country: resolve_or_na(&[&race["circuit"]["country"]]),
        length: display_text(&race["circuit"]["circuitLength"]),
        corners: display_text(&race["circuit"]["corners"]),
        laps: display_text(&race["laps"]),
        winner_name: winner_name(&race["winner"]),
        team_winner_name: team_winner_name(&race["teamWinner"]),
        race_date,
        sessions,
    }
}

/// Normalize the season payload into a round-ordered calendar. An empty or
/// missing race list is a shape failure for the view.
pub fn normalize_season(payload: &Value) -> Option<SeasonCalendar> {
    let mut races: Vec<RaceSummary> = payload["races"]
        .as_array()?
        .iter()
        .map(normalize_race_summary)
        .collect();
    if races.is_empty() {
        return None;
    }
    races.sort_by_key(RaceSummary::round_rank);

    Some(SeasonCalendar {
        season: resolve_text(&[&payload["season"]])
            .unwrap_or_else(|| Utc::now().year().to_string()),
        races,
    })
}

fn is_weekly_gap(gap: Duration) -> bool {
    (gap.num_milliseconds() - WEEK_MS).abs() <= TRIPLE_HEADER_TOLERANCE_MS
}

/// Count three-race windows whose consecutive gaps both land within ±2 days
/// of a week. Windows overlap on purpose: five races spaced exactly a week
/// apart count as three triple-headers, not one.
pub fn count_triple_headers(races: &[RaceSummary]) -> usize {
    let mut dated: Vec<DateTime<Utc>> = races.iter().filter_map(|race| race.race_date).collect();
    dated.sort();
    dated
        .windows(3)
        .filter(|window| {
            is_weekly_gap(window[1] - window[0]) && is_weekly_gap(window[2] - window[1])
        })
        .count()
}

/// Aggregate insights over the calendar. `now` is injected so the
/// completed/remaining split stays deterministic under test.
pub fn season_insights(
    races: &[RaceSummary],
    counts: EntrantCounts,
    now: DateTime<Utc>,
) -> SeasonInsights {
    let completed_races = races
        .iter()
        .filter(|race| race.race_date.map_or(false, |date| date < now))
        .count();
    // Dateless races count as remaining rather than silently vanishing.
    let remaining_races = races
        .iter()
        .filter(|race| race.race_date.map_or(true, |date| date >= now))
        .count();
    let sprint_weekends = races.iter().filter(|race| race.has_sprint()).count();
    let countries: HashSet<&str> = races
        .iter()
        .map(|race| race.country.as_str())
        .filter(|country| !country.is_empty())
        .collect();

    SeasonInsights {
        countries: countries.len(),
        teams: counts.teams,
        drivers: counts.drivers,
        completed_races,
        remaining_races,
        sprint_weekends,
        triple_headers: count_triple_headers(races),
    }
}

/// The single session with the smallest timestamp strictly after `now`.
/// Equal timestamps keep whichever race/session came first in iteration
/// order; that is a determinism note, not a meaningful tie-break.
pub fn find_next_event(races: &[RaceSummary], now: DateTime<Utc>) -> Option<NextEvent<'_>> {
    let mut next: Option<NextEvent<'_>> = None;
    for race in races {
        for session in &race.sessions {
            if session.date > now
                && next
                    .as_ref()
                    .map_or(true, |best| session.date < best.session.date)
            {
                next = Some(NextEvent { race, session });
            }
        }
    }
    next
}
