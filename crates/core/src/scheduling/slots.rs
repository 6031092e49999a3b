//! Slot generation - read-only orchestration over the collaborator ports

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use slotbook_domain::{
    ScheduleError, ScheduleResult, SchedulingConfig, Service, SlotbookError, TimeSlot,
};
use tracing::debug;
use uuid::Uuid;

use super::calendar::slots_for_window;
use super::conflict::{evaluate, Candidate};
use super::ports::{AvailabilityStore, BookingStore, Clock, ServiceCatalog};

/// Generates a full day's slot list for a provider/service/date.
///
/// Output is fully deterministic for unchanged inputs; the booking commit
/// path relies on that by re-running the same evaluation at commit time.
pub struct SlotGenerator {
    availability: Arc<dyn AvailabilityStore>,
    catalog: Arc<dyn ServiceCatalog>,
    bookings: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    config: SchedulingConfig,
}

impl SlotGenerator {
    /// Create a new slot generator over the collaborator ports.
    pub fn new(
        availability: Arc<dyn AvailabilityStore>,
        catalog: Arc<dyn ServiceCatalog>,
        bookings: Arc<dyn BookingStore>,
        clock: Arc<dyn Clock>,
        config: SchedulingConfig,
    ) -> Self {
        Self { availability, catalog, bookings, clock, config }
    }

    /// The scheduling policy this generator runs under.
    pub const fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Resolve and validate the service a request schedules against.
    ///
    /// The service must exist, be active, and belong to the addressed
    /// provider; the provider must exist and be active.
    pub(crate) async fn resolve_service(
        &self,
        provider_id: Uuid,
        service_id: Uuid,
    ) -> ScheduleResult<Service> {
        let provider = self
            .catalog
            .get_provider(provider_id)
            .await?
            .ok_or(ScheduleError::ProviderNotFound(provider_id))?;
        if !provider.active {
            return Err(ScheduleError::ProviderNotFound(provider_id));
        }

        let service = self
            .catalog
            .get_service(service_id)
            .await?
            .ok_or_else(|| SlotbookError::NotFound(format!("service {service_id}")))?;
        if service.provider_id != provider_id {
            return Err(ScheduleError::Store(SlotbookError::NotFound(format!(
                "service {service_id} is not offered by provider {provider_id}"
            ))));
        }
        if !service.active {
            return Err(ScheduleError::ServiceInactive(service_id));
        }

        Ok(service)
    }

    /// Produce the ordered slot list for one provider/service/date.
    ///
    /// Every candidate inside the provider's active windows appears in the
    /// output, available or not; unavailable slots carry their reason so the
    /// booking UI can render them.
    pub async fn generate_day(
        &self,
        provider_id: Uuid,
        service_id: Uuid,
        date: NaiveDate,
    ) -> ScheduleResult<Vec<TimeSlot>> {
        let service = self.resolve_service(provider_id, service_id).await?;
        self.generate_day_for_service(&service, date).await
    }

    /// Same as [`Self::generate_day`] but for an already-resolved service.
    /// Used by the alternative finder to avoid re-validating per day.
    pub(crate) async fn generate_day_for_service(
        &self,
        service: &Service,
        date: NaiveDate,
    ) -> ScheduleResult<Vec<TimeSlot>> {
        let windows =
            self.availability.windows_for_weekday(service.provider_id, date.weekday()).await?;
        if windows.is_empty() {
            debug!(provider_id = %service.provider_id, %date, "no active windows for weekday");
            return Ok(Vec::new());
        }

        let occupying = self.bookings.occupying_bookings(service.provider_id, date).await?;
        let now = self.clock.now();

        let mut slots = Vec::new();
        for window in &windows {
            for start in slots_for_window(
                window,
                service.duration_minutes,
                self.config.step_minutes,
            ) {
                let candidate =
                    Candidate { date, start, duration_minutes: service.duration_minutes };
                let verdict = evaluate(
                    &candidate,
                    &windows,
                    &occupying,
                    now,
                    self.config.min_lead_time_minutes,
                );
                slots.push(match verdict {
                    None => TimeSlot::available(date, start, service.duration_minutes),
                    Some(reason) => {
                        TimeSlot::rejected(date, start, service.duration_minutes, reason)
                    }
                });
            }
        }

        debug!(
            provider_id = %service.provider_id,
            %date,
            total = slots.len(),
            available = slots.iter().filter(|s| s.available).count(),
            "generated day slots"
        );
        Ok(slots)
    }
}
