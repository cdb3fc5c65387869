//! Check-in window phase classification.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::format::format_countdown;

/// Check-in always closes this long before the scheduled time, independent
/// of how early it opens.
pub const CLOSE_BUFFER_MINUTES: i64 = 60;

/// Where the current time falls relative to an event's check-in window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The window has not opened yet.
    Pending,
    /// Check-in is currently possible.
    Open,
    /// The window has closed (or never opened).
    Closed,
}

/// A scheduled event's check-in window. Open and close times are derived,
/// not stored; phase is a pure function of `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInWindow {
    pub scheduled: NaiveDateTime,
    pub lead_time_minutes: i64,
}

impl CheckInWindow {
    pub fn new(scheduled: NaiveDateTime, lead_time_minutes: i64) -> Self {
        Self {
            scheduled,
            lead_time_minutes,
        }
    }

    pub fn open_time(&self) -> NaiveDateTime {
        self.scheduled - Duration::minutes(self.lead_time_minutes)
    }

    /// Close time, clamped so it never precedes the open time. A lead time
    /// shorter than the close buffer would otherwise invert the window;
    /// clamping makes the open interval empty instead, so such an event
    /// moves straight from Pending to Closed.
    pub fn close_time(&self) -> NaiveDateTime {
        let raw = self.scheduled - Duration::minutes(CLOSE_BUFFER_MINUTES);
        raw.max(self.open_time())
    }

    pub fn phase(&self, now: NaiveDateTime) -> Phase {
        if now < self.open_time() {
            Phase::Pending
        } else if now < self.close_time() {
            Phase::Open
        } else {
            Phase::Closed
        }
    }
}

/// Display-ready classification of a check-in window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInInfo {
    pub status_text: String,
    pub countdown_text: Option<String>,
    pub is_open: bool,
    pub is_closed: bool,
}

fn prefix(is_international: bool) -> &'static str {
    if is_international {
        "International check-in"
    } else {
        "Check-in"
    }
}

/// Classify `now` against an event's check-in window and produce display
/// text. Pure function of its inputs; safe to call on every refresh tick.
pub fn classify(
    scheduled: NaiveDateTime,
    lead_time_minutes: i64,
    is_international: bool,
    now: NaiveDateTime,
) -> CheckInInfo {
    let window = CheckInWindow::new(scheduled, lead_time_minutes);
    let prefix = prefix(is_international);

    match window.phase(now) {
        Phase::Pending => CheckInInfo {
            status_text: format!(
                "{prefix} opens {}",
                window.open_time().format("%Y-%m-%d %H:%M")
            ),
            countdown_text: Some(format_countdown(window.open_time() - now)),
            is_open: false,
            is_closed: false,
        },
        Phase::Open => CheckInInfo {
            status_text: format!("{prefix}: OPEN"),
            countdown_text: Some(format_countdown(window.close_time() - now)),
            is_open: true,
            is_closed: false,
        },
        Phase::Closed => CheckInInfo {
            status_text: format!("{prefix}: CLOSED"),
            countdown_text: None,
            is_open: false,
            is_closed: true,
        },
    }
}
