//! Application constants
//!
//! Centralized location for the scheduling policy defaults used throughout
//! the engine. Runtime overrides live in [`crate::config::SchedulingConfig`].

// Slot generation
pub const DEFAULT_STEP_MINUTES: u32 = 15;
pub const DEFAULT_MIN_LEAD_TIME_MINUTES: i64 = 0;

// Alternative search
pub const DEFAULT_SEARCH_HORIZON_DAYS: u32 = 14;
pub const DEFAULT_NEARBY_SAME_DAY: usize = 4;
pub const DEFAULT_MAX_ALTERNATIVES: usize = 10;

// Recurrence expansion
pub const MAX_RECURRENCE_OCCURRENCES: usize = 52;

// Database
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;
