//! SQLite-backed implementation of the AvailabilityStore port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Weekday;
use rusqlite::params;
use slotbook_core::AvailabilityStore;
use slotbook_domain::{AvailabilityWindow, Result};
use tracing::instrument;
use uuid::Uuid;

use super::manager::DbManager;
use super::rows;
use crate::errors::InfraError;

/// SQLite implementation of `AvailabilityStore`.
pub struct SqliteAvailabilityStore {
    db: Arc<DbManager>,
}

impl SqliteAvailabilityStore {
    /// Create a new availability store over the shared pool.
    pub const fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert a window; used by provider-profile glue and test seeding.
    pub fn insert_window(&self, window: &AvailabilityWindow) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO availability_windows
                (id, provider_id, weekday, start_minutes, end_minutes, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                window.id.to_string(),
                window.provider_id.to_string(),
                rows::weekday_to_db(window.weekday),
                slotbook_domain::minutes_from_midnight(window.start),
                slotbook_domain::minutes_from_midnight(window.end),
                window.active,
            ],
        )
        .map_err(InfraError::from)?;
        Ok(())
    }

    /// Deactivate a window. Windows are never deleted.
    pub fn deactivate_window(&self, window_id: Uuid) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "UPDATE availability_windows SET active = 0 WHERE id = ?1",
            params![window_id.to_string()],
        )
        .map_err(InfraError::from)?;
        Ok(())
    }
}

#[async_trait]
impl AvailabilityStore for SqliteAvailabilityStore {
    #[instrument(skip(self), fields(provider_id = %provider_id, ?weekday))]
    async fn windows_for_weekday(
        &self,
        provider_id: Uuid,
        weekday: Weekday,
    ) -> Result<Vec<AvailabilityWindow>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, provider_id, weekday, start_minutes, end_minutes, active
                 FROM availability_windows
                 WHERE provider_id = ?1 AND weekday = ?2 AND active = 1
                 ORDER BY start_minutes",
            )
            .map_err(InfraError::from)?;

        let mapped = stmt
            .query_map(
                params![provider_id.to_string(), rows::weekday_to_db(weekday)],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, i64>(4)?,
                        row.get::<_, bool>(5)?,
                    ))
                },
            )
            .map_err(InfraError::from)?;

        let mut windows = Vec::new();
        for row in mapped {
            let (id, provider, weekday_raw, start_raw, end_raw, active) =
                row.map_err(InfraError::from)?;
            windows.push(AvailabilityWindow {
                id: rows::parse_uuid(&id)?,
                provider_id: rows::parse_uuid(&provider)?,
                weekday: rows::weekday_from_db(weekday_raw)?,
                start: rows::minutes_to_time(start_raw)?,
                end: rows::minutes_to_time(end_raw)?,
                active,
            });
        }
        Ok(windows)
    }
}
