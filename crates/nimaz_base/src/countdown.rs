//! Countdown and clock-time rendering for display layers.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

/// Whole hours, minutes and seconds left until an instant.
///
/// Negative durations render as zero. Sub-second remainders are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn from_delta(delta: TimeDelta) -> Self {
        let total = delta.num_seconds().max(0);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl Display for Countdown {
    /// `"9h 43m 0s"`, `"45m 12s"`, `"12s"`: leading zero units are omitted.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.hours > 0 {
            write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
        } else if self.minutes > 0 {
            write!(f, "{}m {}s", self.minutes, self.seconds)
        } else {
            write!(f, "{}s", self.seconds)
        }
    }
}

pub fn format_countdown(delta: TimeDelta) -> String {
    Countdown::from_delta(delta).to_string()
}

/// 12-hour clock time at a fixed UTC offset, e.g. `"7:15 PM"`.
pub fn format_clock_12h(t: DateTime<Utc>, offset: FixedOffset) -> String {
    t.with_timezone(&offset).format("%-I:%M %p").to_string()
}
