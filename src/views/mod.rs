//! The four dashboard views. Each one is self-contained: it fetches what it
//! needs, normalizes, and prints NFO-style panels. Failures surface as a
//! single error panel plus a "could not load" status line; nothing renders
//! partially.

pub mod last;
pub mod next;
pub mod season;
pub mod standings;

use chrono::{DateTime, Local, SecondsFormat, Utc};

use crate::models::error::AppError;

pub fn error_panel(subject: &str, error: &AppError) -> String {
    [
        format!(" [ERROR  ] Could not fetch {subject}."),
        " [DETAIL ] Check API availability or internet connection.".to_string(),
        format!(" [MSG    ] {error}"),
    ]
    .join("\n")
}

pub fn format_utc(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn format_local(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%a, %b %-d, %Y, %H:%M:%S")
        .to_string()
}

pub fn format_date_only(date: DateTime<Utc>) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_panel_carries_subject_and_message() {
        let error = AppError::Api {
            status: 503,
            url: "https://f1api.dev/api/current/next".to_string(),
        };
        let panel = error_panel("next race", &error);
        assert!(panel.contains("[ERROR  ] Could not fetch next race."));
        assert!(panel.contains("[MSG    ] API error (503)"));
        assert_eq!(panel.lines().count(), 3);
    }
}
