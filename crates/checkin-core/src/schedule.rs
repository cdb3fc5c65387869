//! Wire timestamp parsing for scheduled events.
//!
//! Upstream systems send one of two fixed patterns: a full timestamp for
//! flight events, or a bare date for pre-departure briefings, which are
//! implicitly anchored to 08:00.

use chrono::{NaiveDate, NaiveDateTime};

use crate::window::{classify, CheckInInfo};

pub const FLIGHT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const BRIEFING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Displayed when an event time cannot be parsed.
pub const NOT_AVAILABLE: &str = "N/A";

const BRIEFING_ANCHOR_HOUR: u32 = 8;

/// Which wire pattern an event time matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Flight,
    Briefing,
}

/// Parse an event time in either wire pattern.
pub fn parse_event_time(raw: &str) -> Option<(NaiveDateTime, EventKind)> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, FLIGHT_TIME_FORMAT) {
        return Some((dt, EventKind::Flight));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, BRIEFING_DATE_FORMAT) {
        let dt = date.and_hms_opt(BRIEFING_ANCHOR_HOUR, 0, 0)?;
        return Some((dt, EventKind::Briefing));
    }
    None
}

/// Callers hand lead times over in hours.
pub fn lead_hours_to_minutes(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}

/// Classify a raw event time against the current clock.
///
/// Total: an unparseable time degrades to a fixed [`NOT_AVAILABLE`] status
/// instead of an error, keeping the display path failure-free.
pub fn check_in_status(
    raw_time: &str,
    lead_time_minutes: i64,
    is_international: bool,
    now: NaiveDateTime,
) -> CheckInInfo {
    match parse_event_time(raw_time) {
        Some((scheduled, _)) => classify(scheduled, lead_time_minutes, is_international, now),
        None => {
            tracing::debug!(raw_time, "unparseable event time");
            CheckInInfo {
                status_text: NOT_AVAILABLE.to_string(),
                countdown_text: None,
                is_open: false,
                is_closed: false,
            }
        }
    }
}
