//! Shared test helpers for `slotbook-core` integration tests.
//!
//! These helpers provide reusable fixtures and in-memory port
//! implementations so the scheduling tests can focus on behaviour instead
//! of boilerplate.

pub mod stores;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use slotbook_domain::{AvailabilityWindow, Provider, SchedulingConfig, Service};
use slotbook_core::{AlternativeFinder, BookingService, SlotGenerator};
use uuid::Uuid;

use stores::{FixedClock, InMemoryAvailability, InMemoryBookings, InMemoryCatalog};

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A Monday used across the scenario tests.
pub fn monday() -> NaiveDate {
    date(2026, 3, 2)
}

/// A fixed instant well before every scenario date.
pub fn january_first() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).single().expect("valid timestamp")
}

pub fn window(provider_id: Uuid, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> AvailabilityWindow {
    AvailabilityWindow { id: Uuid::new_v4(), provider_id, weekday, start, end, active: true }
}

pub fn provider(name: &str, rating: f32) -> Provider {
    Provider { id: Uuid::new_v4(), name: name.to_string(), active: true, rating }
}

pub fn service(provider_id: Uuid, name: &str, duration_minutes: u32) -> Service {
    Service { id: Uuid::new_v4(), provider_id, name: name.to_string(), duration_minutes, active: true }
}

/// Fully wired engine over in-memory stores.
pub struct Harness {
    pub availability: Arc<InMemoryAvailability>,
    pub catalog: Arc<InMemoryCatalog>,
    pub bookings: Arc<InMemoryBookings>,
    pub generator: Arc<SlotGenerator>,
    pub finder: AlternativeFinder,
    pub booking_service: Arc<BookingService>,
}

impl Harness {
    pub fn new(
        availability: InMemoryAvailability,
        catalog: InMemoryCatalog,
        bookings: InMemoryBookings,
        config: SchedulingConfig,
    ) -> Self {
        let availability = Arc::new(availability);
        let catalog = Arc::new(catalog);
        let bookings = Arc::new(bookings);
        let clock = Arc::new(FixedClock::new(january_first()));

        let generator = Arc::new(SlotGenerator::new(
            Arc::clone(&availability) as Arc<dyn slotbook_core::AvailabilityStore>,
            Arc::clone(&catalog) as Arc<dyn slotbook_core::ServiceCatalog>,
            Arc::clone(&bookings) as Arc<dyn slotbook_core::BookingStore>,
            Arc::clone(&clock) as Arc<dyn slotbook_core::Clock>,
            config,
        ));
        let finder = AlternativeFinder::new(
            Arc::clone(&generator),
            Arc::clone(&catalog) as Arc<dyn slotbook_core::ServiceCatalog>,
        );
        let booking_service = Arc::new(BookingService::new(
            Arc::clone(&generator),
            Arc::clone(&availability) as Arc<dyn slotbook_core::AvailabilityStore>,
            Arc::clone(&bookings) as Arc<dyn slotbook_core::BookingStore>,
            clock as Arc<dyn slotbook_core::Clock>,
        ));

        Self { availability, catalog, bookings, generator, finder, booking_service }
    }
}
