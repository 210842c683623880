//! Last-race dashboard: winner and fastest-lap highlights plus the full
//! classification table.

use crate::api;
use crate::models::error::AppError;
use crate::models::race::{LastRace, ResultRow};
use crate::normalize::race::normalize_last_race;
use crate::utils::resolve::NOT_AVAILABLE;
use crate::utils::state::AppState;
use crate::views::{error_panel, format_local, format_utc};

pub async fn run(state: &AppState) -> Result<(), AppError> {
    match init(state).await {
        Ok(()) => Ok(()),
        Err(error) => {
            println!("{}", error_panel("last race", &error));
            println!(" [STATUS ] Could not load results.");
            Err(error)
        }
    }
}

async fn init(state: &AppState) -> Result<(), AppError> {
    println!(" [STATUS ] Fetching last race...");
    let payload = api::last_race(state).await?;
    let race = normalize_last_race(&payload)
        .ok_or_else(|| AppError::shape("Could not parse last race response."))?;

    println!("{}", build_nfo(&race));
    println!();
    println!("{}", format_results_table(&race.results));
    println!(" [STATUS ] Last race data loaded.");
    Ok(())
}

fn build_nfo(race: &LastRace) -> String {
    let utc_stamp = race
        .race_date
        .map(format_utc)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let local_stamp = race
        .race_date
        .map(format_local)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    [
        format!(" [EVENT  ] {}", race.name),
        format!(" [SEASON ] {}   [ROUND] {}", race.season, race.round),
        format!(" [TRACK  ] {}", race.circuit_name),
        format!(" [PLACE  ] {}, {}", race.city, race.country),
        format!(" [RACE   ] {utc_stamp}"),
        format!(" [LOCAL  ] {local_stamp}"),
        format!(" [WINNER ] {} ({})", race.winner_name, race.winner_team),
        format!(" [FASTEST] {} - {}", race.fastest_lap, race.fastest_driver),
    ]
    .join("\n")
}

/// Places gained or lost from the starting grid, `N/A` when either side is
/// not numeric.
fn format_grid_delta(row: &ResultRow) -> String {
    match row.grid_delta() {
        Some(delta) if delta > 0 => format!("+{delta} Gained"),
        Some(delta) if delta < 0 => format!("{delta} Lost"),
        Some(_) => "0 Even".to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn format_results_table(rows: &[ResultRow]) -> String {
    let mut lines = vec![format!(
        " {:<4} {:<5} {:<10} {:<5} {:<24} {:<16} {:<14} Status",
        "Pos", "Grid", "Delta", "Pts", "Driver", "Team", "Time"
    )];
    for row in rows {
        lines.push(format!(
            " {:<4} {:<5} {:<10} {:<5} {:<24} {:<16} {:<14} {}",
            row.position,
            row.grid,
            format_grid_delta(row),
            row.points,
            row.driver,
            row.team,
            row.time,
            row.status
        ));
    }
    lines.join("\n")
}
