//! # Slotbook Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The scheduling engine (slot generation, conflict detection,
//!   alternative discovery, recurrence expansion, booking commits)
//! - Port/adapter interfaces (traits) for the collaborator stores
//!
//! ## Architecture Principles
//! - Only depends on `slotbook-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use scheduling::alternatives::AlternativeFinder;
pub use scheduling::booking::BookingService;
pub use scheduling::calendar::slots_for_window;
pub use scheduling::conflict::{evaluate, Candidate};
pub use scheduling::ports::{AvailabilityStore, BookingStore, Clock, ServiceCatalog};
pub use scheduling::recurrence::expand;
pub use scheduling::slots::SlotGenerator;
