//! Integration tests for the SQLite repositories.
//!
//! Each test runs against a fresh temporary database with migrations
//! applied, seeded through the repositories' own insert helpers.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use slotbook_core::{AvailabilityStore, BookingStore, ServiceCatalog};
use slotbook_domain::{
    AvailabilityWindow, Booking, BookingStatus, Provider, Service,
};
use slotbook_infra::{
    DbManager, SqliteAvailabilityStore, SqliteBookingStore, SqliteServiceCatalog,
};
use tempfile::TempDir;
use uuid::Uuid;

struct DbHarness {
    // Keeps the temp directory alive for the duration of the test.
    _dir: TempDir,
    availability: SqliteAvailabilityStore,
    catalog: SqliteServiceCatalog,
    bookings: SqliteBookingStore,
}

impl DbHarness {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir created");
        let db = Arc::new(
            DbManager::new(dir.path().join("test.db"), 2).expect("manager created"),
        );
        db.run_migrations().expect("migrations run");

        Self {
            _dir: dir,
            availability: SqliteAvailabilityStore::new(Arc::clone(&db)),
            catalog: SqliteServiceCatalog::new(Arc::clone(&db)),
            bookings: SqliteBookingStore::new(db),
        }
    }

    fn seed_provider(&self, name: &str, rating: f32) -> Uuid {
        let provider = Provider {
            id: Uuid::new_v4(),
            name: name.to_string(),
            active: true,
            rating,
        };
        self.catalog.insert_provider(&provider).expect("provider inserted");
        provider.id
    }

    fn seed_service(&self, provider_id: Uuid, name: &str, active: bool) -> Uuid {
        let service = Service {
            id: Uuid::new_v4(),
            provider_id,
            name: name.to_string(),
            duration_minutes: 60,
            active,
        };
        self.catalog.insert_service(&service).expect("service inserted");
        service.id
    }

    fn seed_window(
        &self,
        provider_id: Uuid,
        weekday: Weekday,
        start: &str,
        end: &str,
        active: bool,
    ) -> Uuid {
        let window = AvailabilityWindow {
            id: Uuid::new_v4(),
            provider_id,
            weekday,
            start: time(start),
            end: time(end),
            active,
        };
        self.availability.insert_window(&window).expect("window inserted");
        window.id
    }

    async fn seed_booking(
        &self,
        provider_id: Uuid,
        service_id: Uuid,
        date: NaiveDate,
        start: &str,
        status: BookingStatus,
    ) -> Booking {
        let booking = Booking {
            id: Uuid::new_v4(),
            provider_id,
            customer_id: Uuid::new_v4(),
            service_id,
            date,
            start: time(start),
            duration_minutes: 60,
            status,
            address: "12 Main St".to_string(),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).single().expect("timestamp"),
        };
        self.bookings.insert_booking(&booking).await.expect("booking inserted");
        booking
    }
}

fn time(hhmm: &str) -> NaiveTime {
    NaiveTime::parse_from_str(hhmm, "%H:%M").expect("valid time")
}

fn date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").expect("valid date")
}

#[tokio::test(flavor = "multi_thread")]
async fn windows_are_filtered_by_weekday_and_ordered() {
    let h = DbHarness::new();
    let provider = h.seed_provider("Ana", 4.8);

    h.seed_window(provider, Weekday::Mon, "14:00", "18:00", true);
    h.seed_window(provider, Weekday::Mon, "09:00", "12:00", true);
    h.seed_window(provider, Weekday::Tue, "09:00", "12:00", true);

    let windows = h
        .availability
        .windows_for_weekday(provider, Weekday::Mon)
        .await
        .expect("windows loaded");

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].start, time("09:00"));
    assert_eq!(windows[1].start, time("14:00"));
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivated_windows_are_not_returned() {
    let h = DbHarness::new();
    let provider = h.seed_provider("Ana", 4.8);

    let keep = h.seed_window(provider, Weekday::Wed, "09:00", "12:00", true);
    let removed = h.seed_window(provider, Weekday::Wed, "13:00", "17:00", true);
    h.availability.deactivate_window(removed).expect("window deactivated");

    let windows = h
        .availability
        .windows_for_weekday(provider, Weekday::Wed)
        .await
        .expect("windows loaded");

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].id, keep);
}

#[tokio::test(flavor = "multi_thread")]
async fn occupying_bookings_exclude_terminal_statuses() {
    let h = DbHarness::new();
    let provider = h.seed_provider("Ana", 4.8);
    let service = h.seed_service(provider, "Deep Clean", true);
    let day = date("2026-03-02");

    h.seed_booking(provider, service, day, "09:00", BookingStatus::Pending).await;
    h.seed_booking(provider, service, day, "11:00", BookingStatus::Confirmed).await;
    h.seed_booking(provider, service, day, "13:00", BookingStatus::InProgress).await;
    h.seed_booking(provider, service, day, "15:00", BookingStatus::Cancelled).await;
    h.seed_booking(provider, service, day, "16:00", BookingStatus::Completed).await;
    h.seed_booking(provider, service, day, "17:00", BookingStatus::Disputed).await;

    let occupying = h
        .bookings
        .occupying_bookings(provider, day)
        .await
        .expect("bookings loaded");

    assert_eq!(occupying.len(), 3);
    assert!(occupying.iter().all(|b| b.status.is_occupying()));
    // Ordered by start time.
    assert_eq!(occupying[0].start, time("09:00"));
    assert_eq!(occupying[2].start, time("13:00"));
}

#[tokio::test(flavor = "multi_thread")]
async fn occupying_bookings_are_scoped_to_the_requested_day() {
    let h = DbHarness::new();
    let provider = h.seed_provider("Ana", 4.8);
    let service = h.seed_service(provider, "Deep Clean", true);

    h.seed_booking(provider, service, date("2026-03-02"), "09:00", BookingStatus::Confirmed).await;
    h.seed_booking(provider, service, date("2026-03-03"), "09:00", BookingStatus::Confirmed).await;

    let occupying = h
        .bookings
        .occupying_bookings(provider, date("2026-03-02"))
        .await
        .expect("bookings loaded");

    assert_eq!(occupying.len(), 1);
    assert_eq!(occupying[0].date, date("2026-03-02"));
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_round_trips_through_sqlite() {
    let h = DbHarness::new();
    let provider = h.seed_provider("Ana", 4.8);
    let service = h.seed_service(provider, "Deep Clean", true);

    let seeded =
        h.seed_booking(provider, service, date("2026-03-02"), "10:30", BookingStatus::Pending).await;

    let occupying = h
        .bookings
        .occupying_bookings(provider, date("2026-03-02"))
        .await
        .expect("bookings loaded");

    assert_eq!(occupying.len(), 1);
    let loaded = &occupying[0];
    assert_eq!(loaded.id, seeded.id);
    assert_eq!(loaded.customer_id, seeded.customer_id);
    assert_eq!(loaded.service_id, seeded.service_id);
    assert_eq!(loaded.start, time("10:30"));
    assert_eq!(loaded.duration_minutes, 60);
    assert_eq!(loaded.status, BookingStatus::Pending);
    assert_eq!(loaded.address, "12 Main St");
    assert_eq!(loaded.notes, None);
    assert_eq!(loaded.created_at, seeded.created_at);
}

#[tokio::test(flavor = "multi_thread")]
async fn catalog_lookups_return_none_for_unknown_ids() {
    let h = DbHarness::new();

    assert!(h.catalog.get_service(Uuid::new_v4()).await.expect("query ran").is_none());
    assert!(h.catalog.get_provider(Uuid::new_v4()).await.expect("query ran").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn equivalent_services_match_by_name_on_active_providers() {
    let h = DbHarness::new();
    let ana = h.seed_provider("Ana", 4.8);
    let bea = h.seed_provider("Bea", 4.5);
    let carl = h.seed_provider("Carl", 4.9);

    let base = h.seed_service(ana, "Deep Clean", true);
    let rival = h.seed_service(bea, "Deep Clean", true);
    // Same name but inactive, and a different offering entirely.
    h.seed_service(carl, "Deep Clean", false);
    h.seed_service(bea, "Window Wash", true);

    let equivalents = h.catalog.equivalent_services(base).await.expect("query ran");

    assert_eq!(equivalents.len(), 1);
    assert_eq!(equivalents[0].id, rival);
    assert_eq!(equivalents[0].provider_id, bea);
}

#[tokio::test(flavor = "multi_thread")]
async fn service_round_trips_through_sqlite() {
    let h = DbHarness::new();
    let provider = h.seed_provider("Ana", 4.8);
    let service_id = h.seed_service(provider, "Deep Clean", true);

    let service = h
        .catalog
        .get_service(service_id)
        .await
        .expect("query ran")
        .expect("service present");

    assert_eq!(service.provider_id, provider);
    assert_eq!(service.name, "Deep Clean");
    assert_eq!(service.duration_minutes, 60);
    assert!(service.active);

    let loaded_provider = h
        .catalog
        .get_provider(provider)
        .await
        .expect("query ran")
        .expect("provider present");
    assert_eq!(loaded_provider.name, "Ana");
    assert!((loaded_provider.rating - 4.8).abs() < 1e-6);
}
