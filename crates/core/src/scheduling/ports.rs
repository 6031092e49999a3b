//! Port interfaces for the scheduling engine
//!
//! These traits define the boundaries between core business logic and the
//! collaborator stores (availability, service catalog, bookings). The engine
//! never reaches past them; infrastructure implementations live in
//! `slotbook-infra`, in-memory implementations in the test support modules.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use slotbook_domain::{AvailabilityWindow, Booking, Provider, Result, Service};
use uuid::Uuid;

/// Read access to provider availability windows.
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Active windows for a provider on the given weekday, ordered by start
    /// time. Deactivated windows are never returned.
    async fn windows_for_weekday(
        &self,
        provider_id: Uuid,
        weekday: Weekday,
    ) -> Result<Vec<AvailabilityWindow>>;
}

/// Read access to the service catalog and provider directory.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// Look up a service by id.
    async fn get_service(&self, service_id: Uuid) -> Result<Option<Service>>;

    /// Look up a provider by id.
    async fn get_provider(&self, provider_id: Uuid) -> Result<Option<Provider>>;

    /// Equivalent offerings from other active providers, used by the
    /// alternative finder's cross-provider pass. The service identified by
    /// `service_id` itself is not included.
    async fn equivalent_services(&self, service_id: Uuid) -> Result<Vec<Service>>;
}

/// Access to persisted bookings.
///
/// Status transitions are owned by booking-management collaborators outside
/// this engine; the engine only inserts new records and reads occupying ones.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Bookings for a provider on a date whose status still occupies time,
    /// ordered by start time.
    async fn occupying_bookings(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>>;

    /// Persist a newly committed booking.
    async fn insert_booking(&self, booking: &Booking) -> Result<()>;
}

/// Source of "now" for lead-time checks and creation timestamps.
///
/// A trait so tests can pin the clock; the system implementation lives in
/// `slotbook-infra`.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}
