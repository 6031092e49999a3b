//! Availability and booking scheduling engine
//!
//! Data flow: [`slots::SlotGenerator`] (read) →
//! [`alternatives::AlternativeFinder`] (read, on rejection) →
//! [`booking::BookingService`] (write, re-validates through
//! [`conflict`]) → persisted bookings, which feed back into future
//! conflict checks.

pub mod alternatives;
pub mod booking;
pub mod calendar;
pub mod conflict;
pub mod ports;
pub mod recurrence;
pub mod slots;
