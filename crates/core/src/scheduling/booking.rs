//! Booking commits: the only write path in the engine
//!
//! Every commit re-validates the candidate against the current occupying
//! set while holding a lock scoped to `(provider, date)`. That single
//! serialization point is what closes the check-then-act race between the
//! availability a customer saw and the insert that claims the slot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, NaiveDate};
use slotbook_domain::{
    Booking, BookingRequest, BookingStatus, CommitOutcome, RecurrencePattern, RecurringOutcome,
    ScheduleError, ScheduleResult, SkippedOccurrence, SlotbookError,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::conflict::{evaluate, Candidate};
use super::ports::{AvailabilityStore, BookingStore, Clock};
use super::recurrence::expand;
use super::slots::SlotGenerator;

type LockKey = (Uuid, NaiveDate);

/// Per-`(provider, date)` lock table.
///
/// Commit attempts for the same key are totally ordered; attempts for
/// different keys never contend. Entries are created on demand and shared by
/// every writer holding this table - there must be no insert path that
/// bypasses it.
#[derive(Default)]
struct CommitLocks {
    table: Mutex<HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl CommitLocks {
    fn for_key(&self, key: LockKey) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(self.locked_table().entry(key).or_default())
    }

    /// Drop the entry for `key` once the table holds the only reference.
    ///
    /// Callers release their clone first; if another writer grabbed the
    /// entry in the meantime the strong count stays above one and the entry
    /// survives.
    fn release(&self, key: &LockKey) {
        let mut table = self.locked_table();
        if table.get(key).is_some_and(|entry| Arc::strong_count(entry) == 1) {
            table.remove(key);
        }
    }

    fn locked_table(&self) -> std::sync::MutexGuard<'_, HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>> {
        match self.table.lock() {
            Ok(guard) => guard,
            // A poisoned table only means another writer panicked while
            // inserting an entry; the map itself is still usable.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Transactional booking service.
///
/// Holds the same generator the read path uses so commit-time re-validation
/// runs the exact evaluation the customer's slot list came from.
pub struct BookingService {
    generator: Arc<SlotGenerator>,
    availability: Arc<dyn AvailabilityStore>,
    bookings: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    locks: CommitLocks,
}

impl BookingService {
    /// Create a new booking service over the collaborator ports.
    pub fn new(
        generator: Arc<SlotGenerator>,
        availability: Arc<dyn AvailabilityStore>,
        bookings: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { generator, availability, bookings, clock, locks: CommitLocks::default() }
    }

    /// Validate and atomically commit one booking.
    ///
    /// A rejection leaves no state behind; the caller is expected to surface
    /// it and usually follow up with an alternative search.
    pub async fn commit_single(&self, request: &BookingRequest) -> ScheduleResult<CommitOutcome> {
        let service =
            self.generator.resolve_service(request.provider_id, request.service_id).await?;

        let key = (request.provider_id, request.date);
        let guard = self.locks.for_key(key);
        let outcome = {
            let _held = guard.lock().await;
            self.commit_locked(request, service.duration_minutes).await
        };
        drop(guard);
        self.locks.release(&key);
        outcome
    }

    /// The commit body; the caller holds the `(provider, date)` lock.
    async fn commit_locked(
        &self,
        request: &BookingRequest,
        duration_minutes: u32,
    ) -> ScheduleResult<CommitOutcome> {
        // Re-read under the lock; the set used to render the UI is stale by
        // definition.
        let windows = self
            .availability
            .windows_for_weekday(request.provider_id, request.date.weekday())
            .await?;
        let occupying =
            self.bookings.occupying_bookings(request.provider_id, request.date).await?;

        let candidate = Candidate { date: request.date, start: request.start, duration_minutes };
        let now = self.clock.now();
        if let Some(reason) = evaluate(
            &candidate,
            &windows,
            &occupying,
            now,
            self.generator.config().min_lead_time_minutes,
        ) {
            debug!(
                provider_id = %request.provider_id,
                date = %request.date,
                start = %request.start,
                ?reason,
                "commit rejected"
            );
            return Ok(CommitOutcome::Rejected { reason });
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            provider_id: request.provider_id,
            customer_id: request.customer_id,
            service_id: request.service_id,
            date: request.date,
            start: request.start,
            duration_minutes,
            status: BookingStatus::Pending,
            address: request.address.clone(),
            notes: request.notes.clone(),
            created_at: now,
        };
        self.bookings.insert_booking(&booking).await?;

        info!(
            booking_id = %booking.id,
            provider_id = %booking.provider_id,
            date = %booking.date,
            start = %booking.start,
            "booking committed"
        );
        Ok(CommitOutcome::Committed(booking))
    }

    /// Expand a recurrence pattern and commit every occurrence independently.
    ///
    /// Partial success by design: a conflict on one occurrence never aborts
    /// the series, and occurrences already committed survive a failure on a
    /// later one. A pattern with zero occurrences is reported as
    /// [`ScheduleError::EmptyPattern`] rather than an empty success.
    pub async fn commit_recurring(
        &self,
        pattern: &RecurrencePattern,
        provider_id: Uuid,
        service_id: Uuid,
        customer_id: Uuid,
        address: &str,
        notes: Option<&str>,
    ) -> ScheduleResult<RecurringOutcome> {
        let occurrences = expand(pattern, self.generator.config().max_occurrences);
        if occurrences.is_empty() {
            return Err(ScheduleError::EmptyPattern);
        }

        let mut outcome = RecurringOutcome::default();
        for (date, start) in occurrences {
            let request = BookingRequest {
                provider_id,
                service_id,
                customer_id,
                date,
                start,
                address: address.to_string(),
                notes: notes.map(ToString::to_string),
            };
            match self.commit_single(&request).await {
                Ok(CommitOutcome::Committed(booking)) => outcome.committed.push(booking),
                Ok(CommitOutcome::Rejected { reason }) => {
                    outcome.skipped.push(SkippedOccurrence { date, start, reason });
                }
                // Transient store failures abort the remainder of the walk
                // but keep everything committed so far.
                Err(ScheduleError::Store(err)) => {
                    warn!(%date, error = %err, "recurring commit interrupted by store failure");
                    return Err(ScheduleError::Store(SlotbookError::Database(format!(
                        "series interrupted after {} committed occurrence(s): {err}",
                        outcome.committed.len()
                    ))));
                }
                Err(other) => return Err(other),
            }
        }

        info!(
            committed = outcome.committed.len(),
            skipped = outcome.skipped.len(),
            "recurring series committed"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> LockKey {
        (Uuid::new_v4(), NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"))
    }

    #[tokio::test]
    async fn lock_entry_is_evicted_after_the_last_holder_releases() {
        let locks = CommitLocks::default();
        let k = key();

        let guard = locks.for_key(k);
        drop(guard.lock().await);
        drop(guard);
        locks.release(&k);

        assert!(locks.locked_table().is_empty());
    }

    #[tokio::test]
    async fn shared_lock_entry_survives_release_while_another_writer_holds_it() {
        let locks = CommitLocks::default();
        let k = key();

        let first = locks.for_key(k);
        let second = locks.for_key(k);
        drop(first);
        locks.release(&k);

        // The entry must still be the one the second writer holds.
        assert!(Arc::ptr_eq(&second, &locks.for_key(k)));

        drop(second);
        locks.release(&k);
        assert!(locks.locked_table().is_empty());
    }
}
