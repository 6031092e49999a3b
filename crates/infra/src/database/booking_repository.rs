//! SQLite-backed implementation of the BookingStore port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::params;
use slotbook_core::BookingStore;
use slotbook_domain::{minutes_from_midnight, Booking, Result};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::manager::DbManager;
use super::rows;
use crate::errors::InfraError;

/// SQLite implementation of `BookingStore`.
///
/// Only inserts and occupying reads; status transitions belong to the
/// booking-management collaborators and run outside this engine.
pub struct SqliteBookingStore {
    db: Arc<DbManager>,
}

impl SqliteBookingStore {
    /// Create a new booking store over the shared pool.
    pub const fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingStore for SqliteBookingStore {
    #[instrument(skip(self), fields(provider_id = %provider_id, %date))]
    async fn occupying_bookings(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let conn = self.db.get_connection()?;
        let sql = format!(
            "SELECT id, provider_id, customer_id, service_id, date, start_minutes,
                    duration_minutes, status, address, notes, created_at
             FROM bookings
             WHERE provider_id = ?1 AND date = ?2 AND status IN ({})
             ORDER BY start_minutes",
            rows::OCCUPYING_STATUSES
        );
        let mut stmt = conn.prepare(&sql).map_err(InfraError::from)?;

        type BookingRow =
            (String, String, String, String, String, i64, i64, String, String, Option<String>, i64);
        let mapped = stmt
            .query_map(params![provider_id.to_string(), date.to_string()], |row| {
                Ok::<BookingRow, rusqlite::Error>((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                    row.get(8)?,
                    row.get(9)?,
                    row.get(10)?,
                ))
            })
            .map_err(InfraError::from)?;

        let mut bookings = Vec::new();
        for row in mapped {
            let (id, provider, customer, service, date_raw, start, duration, status, address, notes, created) =
                row.map_err(InfraError::from)?;
            bookings.push(Booking {
                id: rows::parse_uuid(&id)?,
                provider_id: rows::parse_uuid(&provider)?,
                customer_id: rows::parse_uuid(&customer)?,
                service_id: rows::parse_uuid(&service)?,
                date: rows::parse_date(&date_raw)?,
                start: rows::minutes_to_time(start)?,
                duration_minutes: rows::duration_from_db(duration)?,
                status: rows::status_from_db(&status)?,
                address,
                notes,
                created_at: rows::timestamp_from_db(created)?,
            });
        }

        debug!(count = bookings.len(), "loaded occupying bookings");
        Ok(bookings)
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.id))]
    async fn insert_booking(&self, booking: &Booking) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO bookings
                (id, provider_id, customer_id, service_id, date, start_minutes,
                 duration_minutes, status, address, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                booking.id.to_string(),
                booking.provider_id.to_string(),
                booking.customer_id.to_string(),
                booking.service_id.to_string(),
                booking.date.to_string(),
                minutes_from_midnight(booking.start),
                booking.duration_minutes,
                rows::status_to_db(booking.status),
                booking.address,
                booking.notes,
                booking.created_at.timestamp(),
            ],
        )
        .map_err(InfraError::from)?;
        Ok(())
    }
}
