//! Race payload normalization for the next-race and last-race views.

use serde_json::Value;

use crate::models::race::{LastRace, NextRace, ResultRow};
use crate::normalize::schedule::extract_sessions;
use crate::utils::resolve::{
    display_text, first_defined, resolve_or_na, resolve_text, NOT_AVAILABLE,
};
use crate::utils::time::{combine_date_time, lap_time_to_ms, parse_timestamp};

/// `name surname` joined when present, else short name, else driver id.
pub fn format_driver_name(driver: &Value) -> String {
    if !driver.is_object() {
        return NOT_AVAILABLE.to_string();
    }
    let full_name = [&driver["name"], &driver["surname"]]
        .iter()
        .filter_map(|part| part.as_str())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !full_name.trim().is_empty() {
        return full_name.trim().to_string();
    }
    resolve_or_na(&[&driver["shortName"], &driver["driverId"]])
}

pub fn format_team_name(team: &Value) -> String {
    if !team.is_object() {
        return NOT_AVAILABLE.to_string();
    }
    resolve_or_na(&[&team["teamName"], &team["name"], &team["teamId"]])
}

/// A payload that wraps its race in a single-element array is unwrapped;
/// an empty array means no race at all.
fn unwrap_race(container: &Value) -> Option<&Value> {
    let race = match container.as_array() {
        Some(items) => items.first()?,
        None => container,
    };
    if race.is_null() {
        None
    } else {
        Some(race)
    }
}

fn normalize_result_row(entry: &Value) -> ResultRow {
    // A non-empty retirement reason marks the row as a DNF.
    let (time, status) = match display_text(&entry["retired"]) {
        Some(reason) => ("DNF".to_string(), format!("DNF ({reason})")),
        None => (resolve_or_na(&[&entry["time"]]), "Finished".to_string()),
    };

    ResultRow {
        position: resolve_or_na(&[&entry["position"]]),
        grid: resolve_or_na(&[&entry["grid"]]),
        points: resolve_text(&[&entry["points"]]).unwrap_or_else(|| "0".to_string()),
        driver: format_driver_name(&entry["driver"]),
        team: format_team_name(&entry["team"]),
        time,
        status,
    }
}

fn find_fastest_lap(results: &[Value]) -> Option<&Value> {
    results
        .iter()
        .filter_map(|entry| {
            lap_time_to_ms(entry["fastLap"].as_str().unwrap_or_default())
                .map(|millis| (millis, entry))
        })
        .min_by_key(|(millis, _)| *millis)
        .map(|(_, entry)| entry)
}

/// Normalize the last-race payload into classification plus highlights.
/// Yields nothing when no race object can be located at all.
pub fn normalize_last_race(payload: &Value) -> Option<LastRace> {
    let race = unwrap_race(&payload["races"])?;

    let empty = Vec::new();
    let results = race["results"].as_array().unwrap_or(&empty);
    let winner = results
        .iter()
        .find(|entry| display_text(&entry["position"]).as_deref() == Some("1"));
    let fastest = find_fastest_lap(results);

    let mut rows: Vec<ResultRow> = results.iter().map(normalize_result_row).collect();
    // API order is not guaranteed; always re-sort by classified position.
    rows.sort_by_key(ResultRow::position_rank);

    Some(LastRace {
        name: resolve_or_na(&[&race["raceName"], &race["name"]]),
        season: resolve_or_na(&[&payload["season"]]),
        round: resolve_or_na(&[&race["round"]]),
        circuit_name: resolve_or_na(&[&race["circuit"]["circuitName"]]),
        city: resolve_or_na(&[&race["circuit"]["city"]]),
        country: resolve_or_na(&[&race["circuit"]["country"]]),
        race_date: combine_date_time(race["date"].as_str(), race["time"].as_str()),
        winner_name: winner
            .map(|entry| format_driver_name(&entry["driver"]))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        winner_team: winner
            .map(|entry| format_team_name(&entry["team"]))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        fastest_lap: fastest
            .and_then(|entry| display_text(&entry["fastLap"]))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        fastest_driver: fastest
            .map(|entry| format_driver_name(&entry["driver"]))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        results: rows,
    })
}

/// Normalize the next-race payload. The race object hides under several
/// historical container fields; the weekend needs a name and at least one
/// usable session timestamp to count.
pub fn normalize_next_race(payload: &Value) -> Option<NextRace> {
    let container = first_defined(&[&payload["race"], &payload["nextRace"], &payload["data"]])
        .unwrap_or(payload);
    let race = unwrap_race(container)?;
    let schedule_race = &race["schedule"]["race"];

    let name = resolve_text(&[
        &race["name"],
        &race["raceName"],
        &race["race_name"],
        &race["grandPrix"],
        &race["grand_prix"],
        &race["event_name"],
    ])?;

    // Fallback for schedules with no usable slots: a combined timestamp
    // field first, then separate date/time parts.
    let mut fallback = resolve_text(&[
        &race["date"],
        &race["dateTime"],
        &race["datetime"],
        &race["start_time"],
        &race["startTime"],
        &race["start_date"],
        &schedule_race["dateTime"],
        &schedule_race["datetime"],
    ])
    .and_then(|raw| parse_timestamp(&raw));
    if fallback.is_none() {
        let date_part =
            resolve_text(&[&race["date"], &race["startDate"], &race["start_date"], &schedule_race["date"]]);
        let time_part =
            resolve_text(&[&race["time"], &race["startTime"], &race["start_time"], &schedule_race["time"]]);
        fallback = combine_date_time(date_part.as_deref(), time_part.as_deref());
    }

    let sessions = extract_sessions(race, fallback);
    if sessions.is_empty() {
        return None;
    }

    Some(NextRace {
        name,
        season: resolve_or_na(&[
            &payload["season"],
            &race["season"],
            &payload["championship"]["year"],
        ]),
        round: resolve_or_na(&[&payload["round"], &race["round"]]),
        circuit_name: resolve_or_na(&[&race["circuit"]["circuitName"], &race["circuit"]["name"]]),
        city: resolve_or_na(&[&race["circuit"]["city"]]),
        country: resolve_or_na(&[&race["circuit"]["country"]]),
        sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionKind;
    use serde_json::json;

    fn last_race_payload() -> Value {
        json!({
            "season": 2025,
            "races": {
                "round": 8,
                "raceName": "Monaco Grand Prix",
                "circuit": { "circuitName": "Circuit de Monaco", "city": "Monte-Carlo", "country": "Monaco" },
                "date": "2025-05-25",
                "time": "13:00:00Z",
                "results": [
                    {
                        "position": 3,
                        "grid": 1,
                        "points": 15,
                        "time": "+5.101",
                        "fastLap": "1:31.002",
                        "driver": { "name": "Charles", "surname": "Leclerc" },
                        "team": { "teamName": "Ferrari" }
                    },
                    {
                        "position": 1,
                        "grid": 2,
                        "points": 25,
                        "time": "1:40:33.843",
                        "fastLap": "1:32.190",
                        "driver": { "name": "Lando", "surname": "Norris" },
                        "team": { "teamName": "McLaren" }
                    },
                    {
                        "position": 2,
                        "grid": 3,
                        "points": 18,
                        "fastLap": "DNF",
                        "retired": "Gearbox",
                        "driver": { "shortName": "VER" },
                        "team": { "name": "Red Bull" }
                    }
                ]
            }
        })
    }

    #[test]
    fn rows_are_resorted_by_numeric_position() {
        let race = normalize_last_race(&last_race_payload()).unwrap();
        let positions: Vec<&str> = race.results.iter().map(|r| r.position.as_str()).collect();
        assert_eq!(positions, vec!["1", "2", "3"]);
    }

    #[test]
    fn winner_is_the_position_one_entry() {
        let race = normalize_last_race(&last_race_payload()).unwrap();
        assert_eq!(race.winner_name, "Lando Norris");
        assert_eq!(race.winner_team, "McLaren");
    }

    #[test]
    fn fastest_lap_ignores_unparsable_times() {
        let race = normalize_last_race(&last_race_payload()).unwrap();
        // "DNF" never wins the comparison even though the entry exists.
        assert_eq!(race.fastest_lap, "1:31.002");
        assert_eq!(race.fastest_driver, "Charles Leclerc");
    }

    #[test]
    fn retirement_marks_the_row_dnf() {
        let race = normalize_last_race(&last_race_payload()).unwrap();
        let retired = &race.results[1];
        assert_eq!(retired.driver, "VER");
        assert_eq!(retired.time, "DNF");
        assert_eq!(retired.status, "DNF (Gearbox)");
        assert_eq!(race.results[0].status, "Finished");
    }

    #[test]
    fn unresolved_fields_fall_back_to_placeholder() {
        let race = normalize_last_race(&json!({ "races": { "results": [] } })).unwrap();
        assert_eq!(race.name, "N/A");
        assert_eq!(race.circuit_name, "N/A");
        assert_eq!(race.winner_name, "N/A");
        assert_eq!(race.fastest_lap, "N/A");
        assert!(race.race_date.is_none());
    }

    #[test]
    fn missing_race_object_is_a_shape_failure() {
        assert!(normalize_last_race(&json!({})).is_none());
        assert!(normalize_last_race(&json!({ "races": [] })).is_none());
    }

    #[test]
    fn next_race_resolves_container_aliases() {
        let payload = json!({
            "season": 2025,
            "round": 9,
            "race": [{
                "raceName": "Spanish Grand Prix",
                "circuit": { "circuitName": "Barcelona-Catalunya", "city": "Barcelona", "country": "Spain" },
                "schedule": {
                    "race": { "date": "2025-06-01", "time": "13:00:00Z" },
                    "qualy": { "date": "2025-05-31", "time": "14:00:00Z" }
                }
            }]
        });

        let race = normalize_next_race(&payload).unwrap();
        assert_eq!(race.name, "Spanish Grand Prix");
        assert_eq!(race.round, "9");
        assert_eq!(race.sessions.len(), 2);
        assert_eq!(race.default_session().unwrap().kind, SessionKind::Race);
    }

    #[test]
    fn next_race_synthesizes_from_fallback_fields() {
        let payload = json!({
            "race": {
                "name": "Testing Grand Prix",
                "date": "2025-06-01",
                "time": "13:00",
                "schedule": {}
            }
        });

        let race = normalize_next_race(&payload).unwrap();
        assert_eq!(race.sessions.len(), 1);
        assert_eq!(race.sessions[0].kind, SessionKind::Race);
    }

    #[test]
    fn next_race_without_name_or_sessions_is_rejected() {
        let unnamed = json!({ "race": { "schedule": { "race": { "date": "2025-06-01", "time": "13:00:00Z" } } } });
        assert!(normalize_next_race(&unnamed).is_none());

        let timeless = json!({ "race": { "name": "Nowhere GP", "schedule": {} } });
        assert!(normalize_next_race(&timeless).is_none());
    }
}
