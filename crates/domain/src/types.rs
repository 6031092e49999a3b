//! Common data types used throughout the scheduling engine

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minutes since midnight for a time-of-day.
///
/// All interval math in the engine runs on this representation so a slot
/// can never overflow a `NaiveTime` while walking a window.
#[must_use]
pub fn minutes_from_midnight(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

/// A recurring weekly availability window owned by one provider.
///
/// Windows are never deleted, only deactivated; inactive windows do not
/// produce slots. Invariant (enforced at the edit surface, assumed here):
/// `start < end`, and windows for the same provider/weekday do not overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub active: bool,
}

impl AvailabilityWindow {
    /// Whether the full candidate interval `[start, start + duration)` fits
    /// inside this window.
    #[must_use]
    pub fn covers(&self, start: NaiveTime, duration_minutes: u32) -> bool {
        let candidate_start = minutes_from_midnight(start);
        let candidate_end = candidate_start + duration_minutes;
        candidate_start >= minutes_from_midnight(self.start)
            && candidate_end <= minutes_from_midnight(self.end)
    }
}

/// A bookable offering. The duration is the unit the engine schedules
/// against; changing it never retroactively alters existing bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub duration_minutes: u32,
    pub active: bool,
}

/// Provider fields the engine reads: identity, active flag, and the rating
/// used as an alternative-ranking tiebreak.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub rating: f32,
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    Disputed,
}

impl BookingStatus {
    /// Whether a booking in this status blocks time on the provider's
    /// calendar. Completed, cancelled, and disputed bookings do not.
    #[must_use]
    pub const fn is_occupying(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::InProgress)
    }
}

/// A persisted booking record.
///
/// `duration_minutes` is copied from the service at creation time, not
/// re-derived, so later service edits cannot shift committed intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub address: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Interval start in minutes since midnight.
    #[must_use]
    pub fn start_minutes(&self) -> u32 {
        minutes_from_midnight(self.start)
    }

    /// Half-open interval end in minutes since midnight.
    #[must_use]
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes() + self.duration_minutes
    }
}

/// Why a candidate slot is not bookable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    OutsideHours,
    OverlapsBooking,
    InPast,
}

/// A transient candidate or alternative slot. Never persisted.
///
/// `provider_id` is set only when the slot belongs to a provider other than
/// the one the caller asked about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<Uuid>,
}

impl TimeSlot {
    /// An available slot at the given date and start time.
    #[must_use]
    pub const fn available(date: NaiveDate, start: NaiveTime, duration_minutes: u32) -> Self {
        Self { date, start, duration_minutes, available: true, reason: None, provider_id: None }
    }

    /// An unavailable slot carrying its rejection reason.
    #[must_use]
    pub const fn rejected(
        date: NaiveDate,
        start: NaiveTime,
        duration_minutes: u32,
        reason: RejectionReason,
    ) -> Self {
        Self {
            date,
            start,
            duration_minutes,
            available: false,
            reason: Some(reason),
            provider_id: None,
        }
    }
}

/// Recurrence stride
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    Weekly,
    Biweekly,
    Monthly,
}

/// A recurrence pattern anchored at a concrete date and time.
///
/// Only the bookings it produces are persisted; the pattern itself is
/// request-scoped. `weekdays` selectors apply to weekly and biweekly
/// patterns only and are ignored for monthly ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    pub kind: RecurrenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<Weekday>>,
    pub anchor_date: NaiveDate,
    pub anchor_time: NaiveTime,
    /// Inclusive end of the series.
    pub end_date: NaiveDate,
}

/// Input to a single booking commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub customer_id: Uuid,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Outcome of a single commit attempt.
///
/// A rejection is a normal, displayable result; callers typically follow it
/// with an alternative search rather than a retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum CommitOutcome {
    Committed(Booking),
    Rejected { reason: RejectionReason },
}

impl CommitOutcome {
    /// The committed booking, if any.
    #[must_use]
    pub const fn booking(&self) -> Option<&Booking> {
        match self {
            Self::Committed(booking) => Some(booking),
            Self::Rejected { .. } => None,
        }
    }
}

/// One occurrence of a recurring series that could not be committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedOccurrence {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub reason: RejectionReason,
}

/// Result of committing a recurring series: partial success by design.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringOutcome {
    pub committed: Vec<Booking>,
    pub skipped: Vec<SkippedOccurrence>,
}
