//! Championship table normalization and ranking.

use serde_json::Value;

use crate::models::standings::{StandingsMode, StandingsRow, StandingsTable};
use crate::normalize::race::format_driver_name;
use crate::utils::resolve::{coerce_f64, coerce_u32, resolve_or_na, resolve_text};

/// Entries with no declared (or garbled) position sink to the bottom
/// instead of crashing the table.
const UNRANKED: u32 = 999;

fn normalize_row(entry: &Value, mode: StandingsMode) -> StandingsRow {
    let (main, secondary, detail_id) = match mode {
        StandingsMode::Drivers => (
            format_driver_name(&entry["driver"]),
            resolve_or_na(&[
                &entry["team"]["teamName"],
                &entry["team"]["name"],
                &entry["teamId"],
            ]),
            resolve_text(&[&entry["driverId"], &entry["driver"]["driverId"]]),
        ),
        StandingsMode::Constructors => (
            resolve_or_na(&[
                &entry["team"]["teamName"],
                &entry["team"]["name"],
                &entry["teamId"],
            ]),
            resolve_or_na(&[&entry["team"]["country"], &entry["team"]["teamNationality"]]),
            resolve_text(&[&entry["teamId"], &entry["team"]["teamId"]]),
        ),
    };

    StandingsRow {
        position: coerce_u32(&entry["position"]).unwrap_or(UNRANKED),
        main,
        secondary,
        points: coerce_f64(&entry["points"]).unwrap_or(0.0),
        wins: coerce_u32(&entry["wins"]).unwrap_or(0),
        gap: 0.0,
        detail_id,
    }
}

/// Normalize one championship payload into a ranked table with
/// gap-to-leader filled in. An empty table is a shape failure.
pub fn normalize_standings(payload: &Value, mode: StandingsMode) -> Option<StandingsTable> {
    let empty = Vec::new();
    let raw = payload[mode.payload_key()].as_array().unwrap_or(&empty);

    let mut rows: Vec<StandingsRow> = raw.iter().map(|entry| normalize_row(entry, mode)).collect();
    rows.sort_by_key(|row| row.position);
    if rows.is_empty() {
        return None;
    }

    let leader_points = rows[0].points;
    for row in &mut rows {
        row.gap = leader_points - row.points;
    }

    Some(StandingsTable {
        mode,
        season: resolve_or_na(&[&payload["season"]]),
        championship_id: resolve_or_na(&[&payload["championshipId"]]),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn drivers_payload() -> Value {
        json!({
            "season": 2025,
            "championshipId": "f1_2025",
            "drivers_championship": [
                {
                    "position": 2,
                    "points": 241,
                    "wins": 3,
                    "driverId": "norris",
                    "driver": { "name": "Lando", "surname": "Norris" },
                    "team": { "teamName": "McLaren" }
                },
                {
                    "position": 1,
                    "points": "250",
                    "wins": "5",
                    "driverId": "piastri",
                    "driver": { "name": "Oscar", "surname": "Piastri" },
                    "team": { "teamName": "McLaren" }
                },
                {
                    "points": 12,
                    "driver": { "shortName": "STR" },
                    "team": { "name": "Aston Martin" }
                }
            ]
        })
    }

    #[test]
    fn rows_sort_ascending_by_position() {
        let table = normalize_standings(&drivers_payload(), StandingsMode::Drivers).unwrap();
        let names: Vec<&str> = table.rows.iter().map(|row| row.main.as_str()).collect();
        assert_eq!(names, vec!["Oscar Piastri", "Lando Norris", "STR"]);
    }

    #[test]
    fn missing_position_sinks_to_the_bottom() {
        let table = normalize_standings(&drivers_payload(), StandingsMode::Drivers).unwrap();
        assert_eq!(table.rows[2].position, 999);
    }

    #[test]
    fn gap_is_leader_points_minus_row_points() {
        let table = normalize_standings(&drivers_payload(), StandingsMode::Drivers).unwrap();
        assert_eq!(table.rows[0].gap, 0.0);
        assert_eq!(table.rows[1].gap, 9.0);
        assert_eq!(table.rows[2].gap, 238.0);
    }

    #[test]
    fn numeric_strings_coerce_and_garbage_defaults_to_zero() {
        let payload = json!({
            "drivers_championship": [
                { "position": 1, "points": "not-a-number", "wins": null,
                  "driver": { "name": "Max", "surname": "Verstappen" } }
            ]
        });
        let table = normalize_standings(&payload, StandingsMode::Drivers).unwrap();
        assert_eq!(table.rows[0].points, 0.0);
        assert_eq!(table.rows[0].wins, 0);
    }

    #[test]
    fn constructor_rows_use_team_fields() {
        let payload = json!({
            "season": 2025,
            "constructors_championship": [
                {
                    "position": 1,
                    "points": 460,
                    "wins": 8,
                    "teamId": "mclaren",
                    "team": { "teamName": "McLaren", "country": "United Kingdom" }
                },
                {
                    "position": 2,
                    "points": 222,
                    "wins": 1,
                    "team": { "name": "Ferrari", "teamNationality": "Italy", "teamId": "ferrari" }
                }
            ]
        });

        let table = normalize_standings(&payload, StandingsMode::Constructors).unwrap();
        assert_eq!(table.rows[0].main, "McLaren");
        assert_eq!(table.rows[0].secondary, "United Kingdom");
        assert_eq!(table.rows[0].detail_id.as_deref(), Some("mclaren"));
        assert_eq!(table.rows[1].main, "Ferrari");
        assert_eq!(table.rows[1].secondary, "Italy");
        assert_eq!(table.rows[1].detail_id.as_deref(), Some("ferrari"));
        assert_eq!(table.rows[1].gap, 238.0);
    }

    #[test]
    fn empty_table_is_a_shape_failure() {
        assert!(normalize_standings(&json!({}), StandingsMode::Drivers).is_none());
        let empty = json!({ "drivers_championship": [] });
        assert!(normalize_standings(&empty, StandingsMode::Drivers).is_none());
    }

    #[test]
    fn top_winner_feeds_the_header_line() {
        let table = normalize_standings(&drivers_payload(), StandingsMode::Drivers).unwrap();
        let top = table.top_winner().unwrap();
        assert_eq!(top.main, "Oscar Piastri");
        assert_eq!(top.wins, 5);
    }
}
