//! Integration tests for scheduling domain types
//!
//! Covers the occupying-status rule, window coverage math, and the wire
//! format of rejection reasons, which the booking UI depends on.

use chrono::{NaiveDate, NaiveTime, Weekday};
use slotbook_domain::{
    AvailabilityWindow, Booking, BookingStatus, RejectionReason, TimeSlot,
};
use uuid::Uuid;

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

#[test]
fn occupying_statuses_match_lifecycle_contract() {
    // Pending, confirmed, and in-progress bookings block time.
    assert!(BookingStatus::Pending.is_occupying());
    assert!(BookingStatus::Confirmed.is_occupying());
    assert!(BookingStatus::InProgress.is_occupying());

    // Terminal statuses release the slot.
    assert!(!BookingStatus::Completed.is_occupying());
    assert!(!BookingStatus::Cancelled.is_occupying());
    assert!(!BookingStatus::Disputed.is_occupying());
}

#[test]
fn window_covers_full_candidate_interval_only() {
    let window = AvailabilityWindow {
        id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        weekday: Weekday::Mon,
        start: time(9, 0),
        end: time(13, 0),
        active: true,
    };

    // Fits exactly at both edges.
    assert!(window.covers(time(9, 0), 60));
    assert!(window.covers(time(12, 0), 60));

    // Starts inside but runs past the end.
    assert!(!window.covers(time(12, 15), 60));

    // Starts before the window opens.
    assert!(!window.covers(time(8, 45), 60));
}

#[test]
fn booking_interval_is_half_open_in_minutes() {
    let booking = Booking {
        id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        start: time(10, 0),
        duration_minutes: 60,
        status: BookingStatus::Confirmed,
        address: "12 Harbor Lane".to_string(),
        notes: None,
        created_at: chrono::Utc::now(),
    };

    assert_eq!(booking.start_minutes(), 600);
    assert_eq!(booking.end_minutes(), 660);
}

#[test]
fn rejection_reasons_serialize_screaming_snake_case() {
    let json = serde_json::to_value(RejectionReason::OutsideHours).expect("serializes");
    assert_eq!(json, serde_json::json!("OUTSIDE_HOURS"));

    let json = serde_json::to_value(RejectionReason::OverlapsBooking).expect("serializes");
    assert_eq!(json, serde_json::json!("OVERLAPS_BOOKING"));

    let json = serde_json::to_value(RejectionReason::InPast).expect("serializes");
    assert_eq!(json, serde_json::json!("IN_PAST"));
}

#[test]
fn available_time_slot_omits_reason_on_the_wire() {
    let slot = TimeSlot::available(
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        time(9, 0),
        60,
    );

    let json = serde_json::to_value(&slot).expect("serializes");
    assert!(json.get("reason").is_none());
    assert!(json.get("providerId").is_none());
    assert_eq!(json["available"], serde_json::json!(true));
}
