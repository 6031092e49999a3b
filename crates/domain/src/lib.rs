//! # Slotbook Domain
//!
//! Business domain types and models for the Slotbook scheduling engine.
//!
//! This crate contains:
//! - Scheduling data types (AvailabilityWindow, Booking, TimeSlot, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Slotbook crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
