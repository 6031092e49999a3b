//! # Slotbook Infrastructure
//!
//! Infrastructure implementations of the core engine ports.
//!
//! This crate contains:
//! - SQLite-backed store implementations (availability, catalog, bookings)
//! - Schema migrations and the connection pool manager
//! - The configuration loader
//! - The system clock
//!
//! ## Architecture
//! - Implements traits defined in `slotbook-core`
//! - Depends on `slotbook-domain` and `slotbook-core`
//! - Contains all "impure" code (I/O, wall clock)

pub mod clock;
pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use clock::SystemClock;
pub use database::{
    DbManager, SqliteAvailabilityStore, SqliteBookingStore, SqliteServiceCatalog,
};
pub use errors::InfraError;
