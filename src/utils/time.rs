//! Timestamp and lap-time parsing helpers shared by the normalizers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a raw timestamp string. Accepts RFC 3339, a naive datetime assumed
/// UTC, and a bare date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&parsed.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Combine a schedule date and time into one timestamp. A bare `HH:MM` time
/// gains seconds; a time that already contains `T` is treated as a complete
/// timestamp on its own. Unparsable combinations yield nothing rather than
/// a fabricated default.
pub fn combine_date_time(date_part: Option<&str>, time_part: Option<&str>) -> Option<DateTime<Utc>> {
    let date = date_part?.trim();
    let raw_time = time_part?.trim();
    if date.is_empty() || raw_time.is_empty() {
        return None;
    }

    if raw_time.contains('T') {
        return parse_timestamp(raw_time);
    }
    let time = if looks_like_hh_mm(raw_time) {
        format!("{raw_time}:00")
    } else {
        raw_time.to_string()
    };
    parse_timestamp(&format!("{date}T{time}"))
}

fn looks_like_hh_mm(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4]
            .iter()
            .all(|&index| bytes[index].is_ascii_digit())
}

/// Parse a `M:SS.mmm` lap time into milliseconds. Anything else (DNF
/// markers, empty strings, free text) is unparsable and excluded from
/// fastest-lap comparisons.
pub fn lap_time_to_ms(lap_time: &str) -> Option<u64> {
    let lap_time = lap_time.trim();
    let (minutes, rest) = lap_time.split_once(':')?;
    let (seconds, millis) = rest.split_once('.')?;
    if minutes.is_empty() || seconds.len() != 2 || millis.len() != 3 {
        return None;
    }
    if ![minutes, seconds, millis]
        .iter()
        .all(|part| part.bytes().all(|byte| byte.is_ascii_digit()))
    {
        return None;
    }

    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    let millis: u64 = millis.parse().ok()?;
    Some((minutes * 60 + seconds) * 1000 + millis)
}
