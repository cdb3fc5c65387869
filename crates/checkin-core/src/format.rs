//! Countdown text formatting. Every function here is total: bad input
//! degrades to a fixed string rather than an error, so display code never
//! has a failure path.

use chrono::Duration;

/// Rendered when the target time has already passed.
pub const TIME_PASSED: &str = "Time passed";

/// Format a duration as days/hours/minutes by floor division.
///
/// Zero-valued leading units are omitted, minutes are always shown, and
/// unit words are pluralized. Non-positive durations render [`TIME_PASSED`]
/// instead of counting backwards.
pub fn format_countdown(duration: Duration) -> String {
    if duration <= Duration::zero() {
        return TIME_PASSED.to_string();
    }

    let total_minutes = duration.num_minutes();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(unit(days, "day"));
    }
    if hours > 0 || !parts.is_empty() {
        parts.push(unit(hours, "hour"));
    }
    parts.push(unit(minutes, "minute"));
    parts.join(", ")
}

fn unit(value: i64, word: &str) -> String {
    if value == 1 {
        format!("{value} {word}")
    } else {
        format!("{value} {word}s")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: positive durations round-trip through the rendered
        /// units back to the floored minute count.
        #[test]
        fn rendered_units_reconstruct_minutes(total in 1i64..100_000) {
            let text = format_countdown(Duration::minutes(total));
            let mut reconstructed = 0i64;
            for part in text.split(", ") {
                let mut it = part.split(' ');
                let value: i64 = it.next().unwrap().parse().unwrap();
                let word = it.next().unwrap();
                reconstructed += match word.trim_end_matches('s') {
                    "day" => value * 24 * 60,
                    "hour" => value * 60,
                    "minute" => value,
                    other => panic!("unexpected unit {other}"),
                };
            }
            prop_assert_eq!(reconstructed, total);
        }

        /// Property: formatting never panics and never renders a negative
        /// number.
        #[test]
        fn never_negative(total in -100_000i64..100_000) {
            let text = format_countdown(Duration::minutes(total));
            prop_assert!(!text.contains('-'));
        }
    }
}
