//! SQLite-backed implementation of the ServiceCatalog port.
//!
//! Equivalence for the cross-provider alternative pass is by service name:
//! two active services with the same name on different providers are the
//! same marketplace offering.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use slotbook_core::ServiceCatalog;
use slotbook_domain::{Provider, Result, Service};
use tracing::instrument;
use uuid::Uuid;

use super::manager::DbManager;
use super::rows;
use crate::errors::InfraError;

/// SQLite implementation of `ServiceCatalog`.
pub struct SqliteServiceCatalog {
    db: Arc<DbManager>,
}

impl SqliteServiceCatalog {
    /// Create a new catalog over the shared pool.
    pub const fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Insert a provider; used by profile glue and test seeding.
    pub fn insert_provider(&self, provider: &Provider) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO providers (id, name, active, rating) VALUES (?1, ?2, ?3, ?4)",
            params![
                provider.id.to_string(),
                provider.name,
                provider.active,
                f64::from(provider.rating),
            ],
        )
        .map_err(InfraError::from)?;
        Ok(())
    }

    /// Insert a service; used by profile glue and test seeding.
    pub fn insert_service(&self, service: &Service) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO services (id, provider_id, name, duration_minutes, active)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                service.id.to_string(),
                service.provider_id.to_string(),
                service.name,
                service.duration_minutes,
                service.active,
            ],
        )
        .map_err(InfraError::from)?;
        Ok(())
    }
}

fn service_from_row(row: &Row<'_>) -> rusqlite::Result<(String, String, String, i64, bool)> {
    Ok((
        row.get::<_, String>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
        row.get::<_, i64>(3)?,
        row.get::<_, bool>(4)?,
    ))
}

fn into_service(raw: (String, String, String, i64, bool)) -> Result<Service> {
    let (id, provider_id, name, duration, active) = raw;
    Ok(Service {
        id: rows::parse_uuid(&id)?,
        provider_id: rows::parse_uuid(&provider_id)?,
        name,
        duration_minutes: rows::duration_from_db(duration)?,
        active,
    })
}

#[async_trait]
impl ServiceCatalog for SqliteServiceCatalog {
    #[instrument(skip(self), fields(service_id = %service_id))]
    async fn get_service(&self, service_id: Uuid) -> Result<Option<Service>> {
        let conn = self.db.get_connection()?;
        let raw = conn
            .query_row(
                "SELECT id, provider_id, name, duration_minutes, active
                 FROM services WHERE id = ?1",
                params![service_id.to_string()],
                service_from_row,
            )
            .optional()
            .map_err(InfraError::from)?;

        raw.map(into_service).transpose()
    }

    #[instrument(skip(self), fields(provider_id = %provider_id))]
    async fn get_provider(&self, provider_id: Uuid) -> Result<Option<Provider>> {
        let conn = self.db.get_connection()?;
        let raw = conn
            .query_row(
                "SELECT id, name, active, rating FROM providers WHERE id = ?1",
                params![provider_id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, bool>(2)?,
                        row.get::<_, f64>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(InfraError::from)?;

        raw.map(|(id, name, active, rating)| {
            Ok(Provider {
                id: rows::parse_uuid(&id)?,
                name,
                active,
                #[allow(clippy::cast_possible_truncation)]
                rating: rating as f32,
            })
        })
        .transpose()
    }

    #[instrument(skip(self), fields(service_id = %service_id))]
    async fn equivalent_services(&self, service_id: Uuid) -> Result<Vec<Service>> {
        let conn = self.db.get_connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT s.id, s.provider_id, s.name, s.duration_minutes, s.active
                 FROM services s
                 JOIN services base ON base.name = s.name
                 JOIN providers p ON p.id = s.provider_id
                 WHERE base.id = ?1 AND s.id != ?1 AND s.active = 1 AND p.active = 1
                 ORDER BY s.id",
            )
            .map_err(InfraError::from)?;

        let mapped = stmt
            .query_map(params![service_id.to_string()], service_from_row)
            .map_err(InfraError::from)?;

        let mut services = Vec::new();
        for row in mapped {
            services.push(into_service(row.map_err(InfraError::from)?)?);
        }
        Ok(services)
    }
}
