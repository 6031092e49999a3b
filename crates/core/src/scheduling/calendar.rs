//! Calendar math: window → candidate start times
//!
//! Pure, deterministic, no I/O. Everything runs on minutes-since-midnight
//! so the walk can never overflow a `NaiveTime`.

use chrono::NaiveTime;
use slotbook_domain::{minutes_from_midnight, AvailabilityWindow};

/// Enumerate candidate start times inside a window.
///
/// Walks from the window start in `step_minutes` increments and emits a
/// candidate only while `candidate + duration` still fits before the window
/// end. A window shorter than the duration yields an empty vector; that is
/// a valid outcome, not an error.
#[must_use]
pub fn slots_for_window(
    window: &AvailabilityWindow,
    duration_minutes: u32,
    step_minutes: u32,
) -> Vec<NaiveTime> {
    if duration_minutes == 0 || step_minutes == 0 {
        return Vec::new();
    }

    let start = minutes_from_midnight(window.start);
    let end = minutes_from_midnight(window.end);

    let mut candidates = Vec::new();
    let mut cursor = start;
    while cursor + duration_minutes <= end {
        if let Some(time) = NaiveTime::from_hms_opt(cursor / 60, cursor % 60, 0) {
            candidates.push(time);
        }
        cursor += step_minutes;
    }
    candidates
}
