//! Recurrence expansion: pattern → ordered occurrence list
//!
//! Pure date math; never consults availability or existing bookings. The
//! occurrence cap and the monthly day-skip are policy, reported through the
//! output shape, never errors.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime};
use slotbook_domain::{RecurrenceKind, RecurrencePattern};

/// Expand a pattern into its ordered `(date, time)` occurrences.
///
/// - Weekly: anchor weekday every 7 days, or one occurrence per selected
///   weekday per week when selectors are present.
/// - Biweekly: the same with a 14-day stride; selectors apply only to weeks
///   at an even offset from the anchor week.
/// - Monthly: the anchor's day-of-month; months lacking that day (e.g. the
///   31st) are skipped, never rolled over.
///
/// The end date is inclusive. Output is capped at `max_occurrences`; an end
/// date before the anchor yields an empty vector.
#[must_use]
pub fn expand(pattern: &RecurrencePattern, max_occurrences: usize) -> Vec<(NaiveDate, NaiveTime)> {
    if pattern.end_date < pattern.anchor_date || max_occurrences == 0 {
        return Vec::new();
    }

    let dates = match pattern.kind {
        RecurrenceKind::Weekly => expand_weekly(pattern, 1, max_occurrences),
        RecurrenceKind::Biweekly => expand_weekly(pattern, 2, max_occurrences),
        RecurrenceKind::Monthly => expand_monthly(pattern, max_occurrences),
    };

    dates.into_iter().map(|date| (date, pattern.anchor_time)).collect()
}

/// Weekly and biweekly share one walk; `week_stride` is 1 or 2.
fn expand_weekly(
    pattern: &RecurrencePattern,
    week_stride: u64,
    max_occurrences: usize,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();

    match &pattern.weekdays {
        None => {
            // Plain stride on the anchor's weekday.
            let mut cursor = pattern.anchor_date;
            while cursor <= pattern.end_date && dates.len() < max_occurrences {
                dates.push(cursor);
                cursor = match cursor.checked_add_days(Days::new(7 * week_stride)) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
        Some(selected) => {
            // One occurrence per selected weekday per (stride-eligible) week,
            // walking day by day from the anchor.
            let mut cursor = pattern.anchor_date;
            while cursor <= pattern.end_date && dates.len() < max_occurrences {
                let week_offset =
                    (cursor - pattern.anchor_date).num_days() / 7;
                let week_selected = week_offset % i64::try_from(week_stride).unwrap_or(1) == 0;
                if week_selected && selected.contains(&cursor.weekday()) {
                    dates.push(cursor);
                }
                cursor = match cursor.checked_add_days(Days::new(1)) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    dates
}

fn expand_monthly(pattern: &RecurrencePattern, max_occurrences: usize) -> Vec<NaiveDate> {
    let anchor_day = pattern.anchor_date.day();
    let mut dates = Vec::new();

    // Walk the first-of-month cursor; the anchor day may not exist in every
    // month, in which case that month contributes nothing.
    let mut month_start = pattern
        .anchor_date
        .with_day(1)
        .unwrap_or(pattern.anchor_date);
    while month_start <= pattern.end_date && dates.len() < max_occurrences {
        if let Some(occurrence) =
            NaiveDate::from_ymd_opt(month_start.year(), month_start.month(), anchor_day)
        {
            if occurrence >= pattern.anchor_date && occurrence <= pattern.end_date {
                dates.push(occurrence);
            }
        }
        month_start = match month_start.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    dates
}
