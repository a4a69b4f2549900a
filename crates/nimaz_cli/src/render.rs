//! Plain-text output for the subcommands.

use std::fmt::Write;

use chrono::FixedOffset;
use nimaz_base::{
    CalculationMethod, DailySchedule, IshaRule, PrayerKind, ResolvedPrayerState, format_clock_12h,
};

pub fn schedule(s: &DailySchedule, offset: FixedOffset) -> String {
    let mut out = String::new();
    for p in s.instants() {
        let marker = if p.kind.is_obligatory() { "" } else { "  (not a prayer)" };
        let _ = writeln!(
            out,
            "{:<8} {:>8}{marker}",
            p.kind.name(),
            format_clock_12h(p.timestamp, offset)
        );
    }
    out
}

pub fn state(st: &ResolvedPrayerState, offset: FixedOffset) -> String {
    format!(
        "Current: {}\nNext:    {} at {} (in {})\n",
        st.current_prayer,
        st.next_prayer,
        format_clock_12h(st.next_prayer_instant, offset),
        st.countdown()
    )
}

/// One-line form redrawn by `watch`.
pub fn tick(st: &ResolvedPrayerState) -> String {
    format!(
        "{} -> {} in {}",
        st.current_prayer,
        st.next_prayer,
        st.countdown()
    )
}

pub fn month(days: &[DailySchedule], offset: FixedOffset) -> String {
    let mut out = format!("{:<10}", "Date");
    for kind in PrayerKind::ALL {
        let _ = write!(out, " {:>8}", kind.name());
    }
    out.push('\n');
    for s in days {
        let _ = write!(out, "{:<10}", s.date());
        for kind in PrayerKind::ALL {
            let _ = write!(out, " {:>8}", format_clock_12h(s.time_for(kind), offset));
        }
        out.push('\n');
    }
    out
}

fn isha_text(rule: Option<IshaRule>) -> String {
    match rule {
        Some(IshaRule::Angle(deg)) => format!("{deg}\u{b0}"),
        Some(IshaRule::MinutesAfterMaghrib(m)) => format!("{m} min"),
        None => "-".to_string(),
    }
}

pub fn methods() -> String {
    let mut out = format!("{:<14} {:>6} {:>7}  {}\n", "Code", "Fajr", "Isha", "Authority");
    for &m in CalculationMethod::all() {
        let fajr = m
            .fajr_angle_deg()
            .map_or_else(|| "-".to_string(), |d| format!("{d}\u{b0}"));
        let _ = writeln!(
            out,
            "{:<14} {:>6} {:>7}  {}",
            m.code(),
            fajr,
            isha_text(m.isha_rule()),
            m.name()
        );
    }
    out
}
