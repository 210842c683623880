//! Season dashboard: the full calendar, aggregate insights, and an optional
//! per-round detail card.

use chrono::Utc;
use serde_json::Value;

use crate::api;
use crate::models::error::AppError;
use crate::models::race::{EntrantCounts, NextEvent, RaceSummary, SeasonCalendar, SeasonInsights};
use crate::normalize::season::{find_next_event, normalize_season, season_insights};
use crate::utils::state::AppState;
use crate::views::{error_panel, format_date_only, format_local};

pub async fn run(state: &AppState, year: Option<i32>, round: Option<String>) -> Result<(), AppError> {
    match init(state, year, round).await {
        Ok(()) => Ok(()),
        Err(error) => {
            println!("{}", error_panel("season races", &error));
            println!(" [STATUS ] Could not load races.");
            Err(error)
        }
    }
}

async fn init(state: &AppState, year: Option<i32>, round: Option<String>) -> Result<(), AppError> {
    let year = year.unwrap_or(state.config.season_year);
    println!(" [STATUS ] Fetching season {year}...");

    // The calendar and both championship tables load together; if any one
    // fails the whole dashboard fails.
    let (season_payload, drivers_payload, constructors_payload) = tokio::try_join!(
        api::season_races(state, year),
        api::drivers_championship(state, Some(year)),
        api::constructors_championship(state, Some(year)),
    )?;

    let calendar = normalize_season(&season_payload)
        .ok_or_else(|| AppError::shape("Could not parse season races response."))?;
    let counts = entrant_counts(&drivers_payload, &constructors_payload);

    let now = Utc::now();
    let insights = season_insights(&calendar.races, counts, now);
    let next_event = find_next_event(&calendar.races, now);

    println!("{}", build_nfo(&calendar, &insights, next_event.as_ref()));
    println!();
    println!("{}", build_stats(&insights));
    println!();
    for race in &calendar.races {
        println!("{}", build_race_line(race));
    }

    if let Some(round) = round {
        println!();
        match calendar.races.iter().find(|race| race.round == round) {
            Some(race) => println!("{}", build_race_card(race)),
            None => println!(" [STATUS ] Round {round} not found in this season."),
        }
    }
    Ok(())
}

/// Championship tables double as entrant counters here; a missing or
/// non-array table just counts zero.
fn entrant_counts(drivers: &Value, constructors: &Value) -> EntrantCounts {
    EntrantCounts {
        drivers: drivers["drivers_championship"].as_array().map_or(0, Vec::len),
        teams: constructors["constructors_championship"]
            .as_array()
            .map_or(0, Vec::len),
    }
}

fn format_next_line(next_event: Option<&NextEvent<'_>>) -> String {
    match next_event {
        None => " [NEXT     ] Completed".to_string(),
        Some(next) => format!(
            " [NEXT     ] {} / {}",
            next.race.name,
            next.session.label()
        ),
    }
}

fn build_nfo(
    calendar: &SeasonCalendar,
    insights: &SeasonInsights,
    next_event: Option<&NextEvent<'_>>,
) -> String {
    [
        format!(" [SEASON   ] {}", calendar.season),
        format!(" [TOTAL    ] {}", calendar.total()),
        format!(" [COUNTRIES] {}", insights.countries),
        format!(" [TEAMS    ] {}", insights.teams),
        format!(" [DRIVERS  ] {}", insights.drivers),
        format_next_line(next_event),
    ]
    .join("\n")
}

fn build_stats(insights: &SeasonInsights) -> String {
    [
        format!(
            " [DONE     ] {:<4} [LEFT     ] {}",
            insights.completed_races, insights.remaining_races
        ),
        format!(
            " [SPRINTS  ] {:<4} [TRIPLES  ] {}",
            insights.sprint_weekends, insights.triple_headers
        ),
    ]
    .join("\n")
}

fn build_race_line(race: &RaceSummary) -> String {
    let date_badge = race
        .race_date
        .map(format_date_only)
        .unwrap_or_else(|| "TBA".to_string());
    format!(" R{:<3} {:<40} {date_badge}", race.round, race.name)
}

fn build_facts(race: &RaceSummary) -> Vec<String> {
    let mut facts = Vec::new();
    if let Some(length) = &race.length {
        facts.push(format!("Length: {length}"));
    }
    if let Some(corners) = &race.corners {
        facts.push(format!("Corners: {corners}"));
    }
    if let Some(laps) = &race.laps {
        facts.push(format!("Laps: {laps}"));
    }
    facts
}

/// Detail card for one round, standing in for the calendar's modal dialog.
fn build_race_card(race: &RaceSummary) -> String {
    let mut lines = vec![
        format!(" [ race {} ] {}", race.round, race.name),
        format!(" {} | {}, {}", race.circuit_name, race.city, race.country),
    ];
    if let Some(date) = race.race_date {
        lines.push(format!(" Race Date: {}", format_local(date)));
    }
    let facts = build_facts(race);
    if !facts.is_empty() {
        lines.push(format!(" {}", facts.join(" | ")));
    }
    let mut result = Vec::new();
    if let Some(winner) = &race.winner_name {
        result.push(format!("Winner: {winner}"));
    }
    if let Some(team) = &race.team_winner_name {
        result.push(format!("Team: {team}"));
    }
    if !result.is_empty() {
        lines.push(format!(" {}", result.join(" | ")));
    }
    for session in &race.sessions {
        lines.push(format!(
            "   {:<14} {}",
            session.label(),
            format_local(session.date)
        ));
    }
    lines.join("\n")
}
