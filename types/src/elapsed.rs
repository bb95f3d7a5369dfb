//! Elapsed-time helpers for the session clock.

use std::time::Duration;

use crate::Timestamp;

/// Time since `start`, clamped to zero when the clock reads earlier than it.
#[must_use]
pub fn elapsed_since(start: Timestamp, now: Timestamp) -> Duration {
    (now - start).to_std().unwrap_or(Duration::ZERO)
}

fn split(elapsed: Duration) -> (u64, u64, u64) {
    let total = elapsed.as_secs();
    (total / 3600, (total % 3600) / 60, total % 60)
}

/// `HH:MM:SS`, as shown by the running session clock.
#[must_use]
pub fn format_clock(elapsed: Duration) -> String {
    let (hours, minutes, seconds) = split(elapsed);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// `{h}h {m}m {s}s`, as recorded next to a submitted verdict.
#[must_use]
pub fn format_duration(elapsed: Duration) -> String {
    let (hours, minutes, seconds) = split(elapsed);
    format!("{hours}h {minutes}m {seconds}s")
}
