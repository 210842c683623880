//! Next-race dashboard: weekend info plus a live one-second countdown to
//! the selected session.

use std::io::Write as _;

use chrono::Utc;
use tokio::time::{interval, Duration};
use tracing::warn;

use crate::api;
use crate::cli::SessionArg;
use crate::countdown::{Countdown, CountdownState, TimeParts};
use crate::models::error::AppError;
use crate::models::race::NextRace;
use crate::models::session::Session;
use crate::normalize::race::normalize_next_race;
use crate::utils::state::AppState;
use crate::views::{error_panel, format_local, format_utc};

pub async fn run(state: &AppState, session: Option<SessionArg>) -> Result<(), AppError> {
    match init(state, session).await {
        Ok(()) => Ok(()),
        Err(error) => {
            println!("{}", error_panel("next race", &error));
            println!(" [STATUS ] No sessions available.");
            Err(error)
        }
    }
}

async fn init(state: &AppState, session_arg: Option<SessionArg>) -> Result<(), AppError> {
    println!(" [STATUS ] Fetching next race...");
    let payload = api::next_race(state).await?;
    let race = normalize_next_race(&payload)
        .ok_or_else(|| AppError::shape("Could not parse race response."))?;

    let requested = session_arg.and_then(|arg| {
        let found = race.session(arg.kind());
        if found.is_none() {
            warn!(session = arg.kind().label(), "requested session not on this weekend");
        }
        found
    });
    let selected = requested
        .or_else(|| race.default_session())
        .ok_or_else(|| AppError::shape("Could not parse race response."))?;

    println!("{}", build_race_nfo(&race, selected));
    println!("{}", build_session_picker(&race, selected));
    run_countdown(selected).await;
    Ok(())
}

fn build_race_nfo(race: &NextRace, session: &Session) -> String {
    [
        format!(" [EVENT  ] {}", race.name),
        format!(" [TARGET ] {}", session.label()),
        format!(" [SEASON ] {}   [ROUND] {}", race.season, race.round),
        format!(" [TRACK  ] {}", race.circuit_name),
        format!(" [PLACE  ] {}, {}", race.city, race.country),
        format!(" [UTC    ] {}", format_utc(session.date)),
        format!(" [LOCAL  ] {}", format_local(session.date)),
    ]
    .join("\n")
}

fn build_session_picker(race: &NextRace, selected: &Session) -> String {
    let labels: Vec<String> = race
        .sessions
        .iter()
        .map(|session| {
            if session.kind == selected.kind {
                format!("[{}]", session.label())
            } else {
                session.label().to_string()
            }
        })
        .collect();
    format!(" [SESSION] {}", labels.join("  "))
}

/// Redraws the countdown line once per second; when the session goes live
/// the line pins at zero and the loop ends. The countdown never advances to
/// another session by itself.
async fn run_countdown(session: &Session) {
    let countdown = Countdown::new(session.date);
    let mut ticker = interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        match countdown.tick(Utc::now()) {
            CountdownState::Counting(parts) => {
                print!(
                    "\r [T-MINUS] {} | Counting down to {}...",
                    parts.display(),
                    session.label()
                );
                let _ = std::io::stdout().flush();
            }
            CountdownState::Live => {
                println!(
                    "\r [T-MINUS] {} | {} is live now.      ",
                    TimeParts::ZERO.display(),
                    session.label()
                );
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionKind;
    use chrono::TimeZone;

    fn sample_race() -> NextRace {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 13, 0, 0).unwrap();
        NextRace {
            name: "Spanish Grand Prix".to_string(),
            season: "2025".to_string(),
            round: "9".to_string(),
            circuit_name: "Barcelona-Catalunya".to_string(),
            city: "Barcelona".to_string(),
            country: "Spain".to_string(),
            sessions: vec![
                Session {
                    kind: SessionKind::Race,
                    date,
                },
                Session {
                    kind: SessionKind::Qualifying,
                    date: date - chrono::Duration::days(1),
                },
            ],
        }
    }

    #[test]
    fn nfo_lists_event_target_and_utc_stamp() {
        let race = sample_race();
        let nfo = build_race_nfo(&race, &race.sessions[0]);
        assert!(nfo.contains("[EVENT  ] Spanish Grand Prix"));
        assert!(nfo.contains("[TARGET ] Race"));
        assert!(nfo.contains("[SEASON ] 2025   [ROUND] 9"));
        assert!(nfo.contains("[UTC    ] 2025-06-01T13:00:00Z"));
    }

    #[test]
    fn picker_marks_the_selected_session() {
        let race = sample_race();
        let picker = build_session_picker(&race, &race.sessions[1]);
        assert_eq!(picker, " [SESSION] Race  [Qualy]");
    }
}
