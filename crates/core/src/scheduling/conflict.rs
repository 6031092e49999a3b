//! Conflict detection for a single candidate slot
//!
//! Pure decision logic: the caller supplies the availability windows for the
//! candidate's weekday and the occupying bookings for its date. Check order
//! is fixed (outside-hours, then overlap, then lead time) so a slot that is
//! wrong in several ways always reports the same reason.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use slotbook_domain::{
    minutes_from_midnight, AvailabilityWindow, Booking, RejectionReason,
};

/// A candidate interval under evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: u32,
}

impl Candidate {
    fn start_minutes(&self) -> u32 {
        minutes_from_midnight(self.start)
    }

    fn end_minutes(&self) -> u32 {
        self.start_minutes() + self.duration_minutes
    }
}

/// Half-open interval overlap: `[a_start, a_end)` intersects
/// `[b_start, b_end)`. Intervals that merely touch do not overlap; a booking
/// ending at 10:00 never conflicts with a slot starting at 10:00.
#[must_use]
pub const fn intervals_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start < b_end && b_start < a_end
}

/// Evaluate one candidate against windows, occupying bookings, and the clock.
///
/// Returns `None` when the candidate is bookable, otherwise the first
/// applicable rejection reason. `occupying` must already be filtered to
/// non-terminal statuses and to the candidate's date; `windows` to its
/// weekday and the active flag.
#[must_use]
pub fn evaluate(
    candidate: &Candidate,
    windows: &[AvailabilityWindow],
    occupying: &[Booking],
    now: DateTime<Utc>,
    min_lead_minutes: i64,
) -> Option<RejectionReason> {
    let covered = windows
        .iter()
        .any(|window| window.covers(candidate.start, candidate.duration_minutes));
    if !covered {
        return Some(RejectionReason::OutsideHours);
    }

    let overlaps = occupying.iter().any(|booking| {
        intervals_overlap(
            candidate.start_minutes(),
            candidate.end_minutes(),
            booking.start_minutes(),
            booking.end_minutes(),
        )
    });
    if overlaps {
        return Some(RejectionReason::OverlapsBooking);
    }

    let slot_start = candidate.date.and_time(candidate.start).and_utc();
    let earliest_allowed = now + chrono::Duration::minutes(min_lead_minutes);
    if slot_start < earliest_allowed {
        return Some(RejectionReason::InPast);
    }

    None
}
