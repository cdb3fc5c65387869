//! Check-in window classification for scheduled departures and briefings.
//!
//! Pure time arithmetic: given an event's scheduled time and how long
//! before it check-in opens, classify the current moment into pending,
//! open, or closed, and render display text for each. No state, no I/O;
//! callers re-invoke on every refresh tick.

pub mod format;
pub mod schedule;
pub mod window;

pub use format::{format_countdown, TIME_PASSED};
pub use schedule::{
    check_in_status, lead_hours_to_minutes, parse_event_time, EventKind, NOT_AVAILABLE,
};
pub use window::{classify, CheckInInfo, CheckInWindow, Phase, CLOSE_BUFFER_MINUTES};
