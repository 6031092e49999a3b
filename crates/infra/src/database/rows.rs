//! Row-mapping helpers shared by the SQLite repositories.
//!
//! The schema stores times-of-day as minutes since midnight, dates as
//! ISO-8601 text, weekdays as 0-6 with 0 = Monday, and instants as unix
//! seconds. Everything here converts between those encodings and the
//! domain types, reporting malformed rows as database errors rather than
//! panicking.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use slotbook_domain::{BookingStatus, Result, SlotbookError};
use uuid::Uuid;

pub fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| SlotbookError::Database(format!("malformed uuid {raw:?}: {e}")))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|e| SlotbookError::Database(format!("malformed date {raw:?}: {e}")))
}

pub fn minutes_to_time(minutes: i64) -> Result<NaiveTime> {
    let minutes = u32::try_from(minutes)
        .map_err(|_| SlotbookError::Database(format!("negative time-of-day: {minutes}")))?;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .ok_or_else(|| SlotbookError::Database(format!("time-of-day out of range: {minutes}")))
}

pub fn duration_from_db(minutes: i64) -> Result<u32> {
    u32::try_from(minutes)
        .map_err(|_| SlotbookError::Database(format!("negative duration: {minutes}")))
}

pub const fn weekday_to_db(weekday: Weekday) -> u32 {
    weekday.num_days_from_monday()
}

pub fn weekday_from_db(raw: i64) -> Result<Weekday> {
    u8::try_from(raw)
        .ok()
        .and_then(|n| Weekday::try_from(n).ok())
        .ok_or_else(|| SlotbookError::Database(format!("weekday out of range: {raw}")))
}

pub fn timestamp_from_db(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| SlotbookError::Database(format!("timestamp out of range: {secs}")))
}

pub const fn status_to_db(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "pending",
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::InProgress => "in_progress",
        BookingStatus::Completed => "completed",
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::Disputed => "disputed",
    }
}

pub fn status_from_db(raw: &str) -> Result<BookingStatus> {
    match raw {
        "pending" => Ok(BookingStatus::Pending),
        "confirmed" => Ok(BookingStatus::Confirmed),
        "in_progress" => Ok(BookingStatus::InProgress),
        "completed" => Ok(BookingStatus::Completed),
        "cancelled" => Ok(BookingStatus::Cancelled),
        "disputed" => Ok(BookingStatus::Disputed),
        other => Err(SlotbookError::Database(format!("unknown booking status {other:?}"))),
    }
}

/// The statuses that occupy provider time, as stored.
pub const OCCUPYING_STATUSES: &str = "'pending', 'confirmed', 'in_progress'";
