//! SQLite-backed implementations of the scheduling engine ports.

mod availability_repository;
mod booking_repository;
mod catalog_repository;
mod manager;
mod rows;

pub use availability_repository::SqliteAvailabilityStore;
pub use booking_repository::SqliteBookingStore;
pub use catalog_repository::SqliteServiceCatalog;
pub use manager::{DbConnection, DbManager};
