//! In-memory port implementations for testing
//!
//! Deterministic stand-ins for the collaborator stores, enabling engine
//! tests without database dependencies. The booking store is genuinely
//! mutable so commit-path tests observe their own writes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use slotbook_core::{AvailabilityStore, BookingStore, Clock, ServiceCatalog};
use slotbook_domain::{
    AvailabilityWindow, Booking, Provider, Result as DomainResult, Service,
};
use uuid::Uuid;

/// In-memory `AvailabilityStore` seeded with a fixed window set.
#[derive(Default, Clone)]
pub struct InMemoryAvailability {
    windows: Arc<Vec<AvailabilityWindow>>,
}

impl InMemoryAvailability {
    pub fn new(windows: Vec<AvailabilityWindow>) -> Self {
        Self { windows: Arc::new(windows) }
    }

    /// Convenience helper for adding a single window.
    pub fn with_window(mut self, window: AvailabilityWindow) -> Self {
        Arc::make_mut(&mut self.windows).push(window);
        self
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryAvailability {
    async fn windows_for_weekday(
        &self,
        provider_id: Uuid,
        weekday: Weekday,
    ) -> DomainResult<Vec<AvailabilityWindow>> {
        let mut windows: Vec<AvailabilityWindow> = self
            .windows
            .iter()
            .filter(|w| w.provider_id == provider_id && w.weekday == weekday && w.active)
            .cloned()
            .collect();
        windows.sort_by_key(|w| w.start);
        Ok(windows)
    }
}

/// In-memory `ServiceCatalog` over fixed provider and service sets.
///
/// Services are "equivalent" when they share a name, mirroring a
/// marketplace category lookup.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    providers: Arc<Vec<Provider>>,
    services: Arc<Vec<Service>>,
}

impl InMemoryCatalog {
    pub fn new(providers: Vec<Provider>, services: Vec<Service>) -> Self {
        Self { providers: Arc::new(providers), services: Arc::new(services) }
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryCatalog {
    async fn get_service(&self, service_id: Uuid) -> DomainResult<Option<Service>> {
        Ok(self.services.iter().find(|s| s.id == service_id).cloned())
    }

    async fn get_provider(&self, provider_id: Uuid) -> DomainResult<Option<Provider>> {
        Ok(self.providers.iter().find(|p| p.id == provider_id).cloned())
    }

    async fn equivalent_services(&self, service_id: Uuid) -> DomainResult<Vec<Service>> {
        let Some(base) = self.services.iter().find(|s| s.id == service_id) else {
            return Ok(Vec::new());
        };
        Ok(self
            .services
            .iter()
            .filter(|s| s.id != service_id && s.name == base.name)
            .cloned()
            .collect())
    }
}

/// Mutable in-memory `BookingStore`.
#[derive(Default, Clone)]
pub struct InMemoryBookings {
    bookings: Arc<Mutex<Vec<Booking>>>,
}

impl InMemoryBookings {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings: Arc::new(Mutex::new(bookings)) }
    }

    /// Every booking currently stored, in insertion order.
    pub fn all(&self) -> Vec<Booking> {
        self.bookings.lock().expect("booking store lock").clone()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookings {
    async fn occupying_bookings(
        &self,
        provider_id: Uuid,
        date: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let mut occupying: Vec<Booking> = self
            .bookings
            .lock()
            .expect("booking store lock")
            .iter()
            .filter(|b| b.provider_id == provider_id && b.date == date && b.status.is_occupying())
            .cloned()
            .collect();
        occupying.sort_by_key(Booking::start_minutes);
        Ok(occupying)
    }

    async fn insert_booking(&self, booking: &Booking) -> DomainResult<()> {
        self.bookings.lock().expect("booking store lock").push(booking.clone());
        Ok(())
    }
}

/// `Clock` pinned to a fixed instant.
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
