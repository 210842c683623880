//! Standings dashboard: drivers/constructors championship tables with a
//! podium block and an interactive prompt for switching tables and pulling
//! cached detail profiles.

use std::io::Write as _;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api;
use crate::models::error::AppError;
use crate::models::standings::{StandingsMode, StandingsTable};
use crate::normalize::race::format_driver_name;
use crate::normalize::standings::normalize_standings;
use crate::utils::resolve::{resolve_or_na, resolve_text};
use crate::utils::state::AppState;
use crate::views::error_panel;

pub async fn run(state: &AppState, constructors: bool) -> Result<(), AppError> {
    match init(state, constructors).await {
        Ok(()) => Ok(()),
        Err(error) => {
            println!("{}", error_panel("standings", &error));
            println!(" [STATUS ] Could not load standings.");
            Err(error)
        }
    }
}

/// Per-view mutable state: the table selector. Both tables are loaded up
/// front; the detail cache lives on [`AppState`].
struct StandingsView {
    mode: StandingsMode,
    drivers: StandingsTable,
    constructors: StandingsTable,
}

impl StandingsView {
    fn current(&self) -> &StandingsTable {
        match self.mode {
            StandingsMode::Drivers => &self.drivers,
            StandingsMode::Constructors => &self.constructors,
        }
    }
}

async fn init(state: &AppState, constructors: bool) -> Result<(), AppError> {
    println!(" [STATUS ] Fetching standings...");
    let (drivers_payload, constructors_payload) = tokio::try_join!(
        api::drivers_championship(state, None),
        api::constructors_championship(state, None),
    )?;

    let shape = || AppError::shape("Could not parse standings response.");
    let view = StandingsView {
        mode: if constructors {
            StandingsMode::Constructors
        } else {
            StandingsMode::Drivers
        },
        drivers: normalize_standings(&drivers_payload, StandingsMode::Drivers).ok_or_else(shape)?,
        constructors: normalize_standings(&constructors_payload, StandingsMode::Constructors)
            .ok_or_else(shape)?,
    };

    render(view.current());
    prompt_loop(state, view).await;
    Ok(())
}

fn render(table: &StandingsTable) {
    println!("{}", build_nfo(table));
    println!();
    println!("{}", build_podium(table));
    println!();
    println!("{}", format_table(table));
}

async fn prompt_loop(state: &AppState, mut view: StandingsView) {
    println!();
    println!(" commands: drivers | constructors | detail <row> | quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("standings> ");
        let _ = std::io::stdout().flush();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            _ => break,
        };
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("drivers") | Some("d"), _) => {
                view.mode = StandingsMode::Drivers;
                render(view.current());
            }
            (Some("constructors") | Some("teams") | Some("c"), _) => {
                view.mode = StandingsMode::Constructors;
                render(view.current());
            }
            (Some("detail"), Some(row)) => show_detail(state, view.current(), row).await,
            (Some("quit") | Some("q") | Some("exit"), _) => break,
            (None, _) => {}
            _ => println!(" commands: drivers | constructors | detail <row> | quit"),
        }
    }
}

/// Detail lookups go through the memoized profile fetch; any failure stays
/// inside this panel and leaves the table and cache alone.
async fn show_detail(state: &AppState, table: &StandingsTable, row_arg: &str) {
    let row = row_arg
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| table.rows.get(index));
    let Some(row) = row else {
        println!(" [ detail error ]");
        println!(" No such row: {row_arg}");
        return;
    };
    let Some(id) = &row.detail_id else {
        println!(" [ detail error ]");
        println!(" No profile id reported for {}", row.main);
        return;
    };

    let kind = table.mode.detail_kind();
    let detail = match api::detail_profile(state, kind, id).await {
        Ok(payload) => match table.mode {
            StandingsMode::Drivers => render_driver_detail(&payload),
            StandingsMode::Constructors => render_team_detail(&payload),
        },
        Err(error) => Err(error),
    };
    match detail {
        Ok(panel) => println!("{panel}"),
        Err(error) => {
            println!(" [ detail error ]");
            println!(" {error}");
        }
    }
}

fn detail_line(label: &str, value: String) -> String {
    format!("   {label}: {value}")
}

fn render_driver_detail(payload: &Value) -> Result<String, AppError> {
    let driver = payload["driver"]
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| AppError::shape("Driver detail missing."))?;

    let mut lines = vec![
        format!(" [ driver ] {}", format_driver_name(driver)),
        detail_line("Nationality", resolve_or_na(&[&driver["nationality"]])),
        detail_line("Birthday", resolve_or_na(&[&driver["birthday"]])),
        detail_line("Number", resolve_or_na(&[&driver["number"]])),
        detail_line("Short Name", resolve_or_na(&[&driver["shortName"]])),
        detail_line("Driver ID", resolve_or_na(&[&driver["driverId"]])),
    ];
    if let Some(url) = driver["url"].as_str() {
        lines.push(detail_line("Reference", url.to_string()));
    }
    Ok(lines.join("\n"))
}

fn render_team_detail(payload: &Value) -> Result<String, AppError> {
    let team = payload["team"]
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| AppError::shape("Team detail missing."))?;

    let mut lines = vec![
        format!(
            " [ constructor ] {}",
            resolve_or_na(&[&team["teamName"], &team["teamId"]])
        ),
        detail_line(
            "Nationality",
            resolve_or_na(&[&team["teamNationality"], &team["country"]]),
        ),
        // The API has shipped both misspellings of this field.
        detail_line(
            "First Appearance",
            resolve_or_na(&[&team["firstAppeareance"], &team["firstAppareance"]]),
        ),
        detail_line(
            "Constructors Titles",
            resolve_text(&[&team["constructorsChampionships"]]).unwrap_or_else(|| "0".to_string()),
        ),
        detail_line(
            "Drivers Titles",
            resolve_text(&[&team["driversChampionships"]]).unwrap_or_else(|| "0".to_string()),
        ),
        detail_line("Team ID", resolve_or_na(&[&team["teamId"]])),
    ];
    if let Some(url) = team["url"].as_str() {
        lines.push(detail_line("Reference", url.to_string()));
    }
    Ok(lines.join("\n"))
}

/// Points print without a trailing `.0` unless the value is fractional.
fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        points.to_string()
    }
}

fn build_nfo(table: &StandingsTable) -> String {
    let leader = &table.rows[0];
    let wins_line = table
        .top_winner()
        .map(|row| format!("{} ({})", row.main, row.wins))
        .unwrap_or_else(|| "N/A".to_string());

    [
        format!(" [TYPE   ] {}", table.mode.title()),
        format!(" [SEASON ] {}", table.season),
        format!(" [ENTRYS ] {}", table.total()),
        format!(" [LEADER ] {}", leader.main),
        format!(" [POINTS ] {}", format_points(leader.points)),
        format!(" [WINS   ] {wins_line}"),
    ]
    .join("\n")
}

fn build_podium(table: &StandingsTable) -> String {
    table
        .rows
        .iter()
        .take(3)
        .map(|row| {
            format!(
                " #{} {} | {} pts | {} wins",
                row.position,
                row.main,
                format_points(row.points),
                row.wins
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_table(table: &StandingsTable) -> String {
    let mode = table.mode;
    let mut lines = vec![format!(
        " {:<4} {:<26} {:<22} {:<7} {:<5} Gap",
        "Pos",
        mode.main_column(),
        mode.secondary_column(),
        "Pts",
        "Wins"
    )];
    for row in &table.rows {
        let gap = if row.position == 1 {
            "-".to_string()
        } else {
            format!("-{}", format_points(row.gap))
        };
        lines.push(format!(
            " {:<4} {:<26} {:<22} {:<7} {:<5} {gap}",
            row.position,
            row.main,
            row.secondary,
            format_points(row.points),
            row.wins
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::standings::StandingsRow;
    use serde_json::json;

    fn sample_table() -> StandingsTable {
        StandingsTable {
            mode: StandingsMode::Drivers,
            season: "2025".to_string(),
            championship_id: "f1_2025".to_string(),
            rows: vec![
                StandingsRow {
                    position: 1,
                    main: "Oscar Piastri".to_string(),
                    secondary: "McLaren".to_string(),
                    points: 250.0,
                    wins: 5,
                    gap: 0.0,
                    detail_id: Some("piastri".to_string()),
                },
                StandingsRow {
                    position: 2,
                    main: "Lando Norris".to_string(),
                    secondary: "McLaren".to_string(),
                    points: 241.5,
                    wins: 3,
                    gap: 8.5,
                    detail_id: Some("norris".to_string()),
                },
            ],
        }
    }

    #[test]
    fn leader_gap_renders_as_dash() {
        let rendered = format_table(&sample_table());
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[1].ends_with(" -"));
        assert!(lines[2].ends_with("-8.5"));
    }

    #[test]
    fn points_drop_trailing_zero_fraction() {
        assert_eq!(format_points(250.0), "250");
        assert_eq!(format_points(241.5), "241.5");
    }

    #[test]
    fn nfo_names_leader_and_top_winner() {
        let nfo = build_nfo(&sample_table());
        assert!(nfo.contains("[TYPE   ] drivers championship"));
        assert!(nfo.contains("[LEADER ] Oscar Piastri"));
        assert!(nfo.contains("[POINTS ] 250"));
        assert!(nfo.contains("[WINS   ] Oscar Piastri (5)"));
    }

    #[test]
    fn driver_detail_requires_the_driver_array() {
        let payload = json!({
            "driver": [{
                "name": "Fernando", "surname": "Alonso",
                "nationality": "Spanish", "number": 14,
                "shortName": "ALO", "driverId": "alonso",
                "url": "https://en.wikipedia.org/wiki/Fernando_Alonso"
            }]
        });
        let panel = render_driver_detail(&payload).unwrap();
        assert!(panel.contains("[ driver ] Fernando Alonso"));
        assert!(panel.contains("Nationality: Spanish"));
        assert!(panel.contains("Number: 14"));
        assert!(panel.contains("Reference: https://en.wikipedia.org/wiki/Fernando_Alonso"));

        assert!(render_driver_detail(&json!({ "driver": {} })).is_err());
    }

    #[test]
    fn team_detail_defaults_title_counts_to_zero() {
        let payload = json!({
            "team": [{ "teamName": "McLaren", "teamNationality": "British" }]
        });
        let panel = render_team_detail(&payload).unwrap();
        assert!(panel.contains("[ constructor ] McLaren"));
        assert!(panel.contains("Constructors Titles: 0"));
        assert!(panel.contains("Drivers Titles: 0"));

        assert!(render_team_detail(&json!({})).is_err());
    }
}
