//! Countdown state machine for the next-event view.
//!
//! One machine per selected session. Each tick recomputes the remaining
//! time; once the session timestamp passes, the machine is Live and stays
//! there — it never advances to another session on its own. Picking a
//! different session means building a new machine.

use chrono::{DateTime, Utc};

/// Remaining time decomposed by floor division; no rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeParts {
    pub const ZERO: TimeParts = TimeParts {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    fn from_seconds(total: i64) -> Self {
        TimeParts {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    /// `DD:HH:MM:SS` with zero-padded pairs.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Counting(TimeParts),
    Live,
}

#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    target: DateTime<Utc>,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Countdown { target }
    }

    pub fn tick(&self, now: DateTime<Utc>) -> CountdownState {
        let remaining_ms = (self.target - now).num_milliseconds();
        if remaining_ms <= 0 {
            return CountdownState::Live;
        }
        CountdownState::Counting(TimeParts::from_seconds(remaining_ms / 1000))
    }
}
