//! Configuration structures
//!
//! Plain data; loading (environment variables, config files) happens in the
//! infra crate.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DB_POOL_SIZE, DEFAULT_MAX_ALTERNATIVES, DEFAULT_MIN_LEAD_TIME_MINUTES,
    DEFAULT_NEARBY_SAME_DAY, DEFAULT_SEARCH_HORIZON_DAYS, DEFAULT_STEP_MINUTES,
    MAX_RECURRENCE_OCCURRENCES,
};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Connection pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// Scheduling policy values.
///
/// Every field has a documented default from [`crate::constants`]; deployments
/// override them per marketplace, not per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Candidate slot granularity in minutes
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
    /// Minimum lead time before a slot may start, in minutes
    #[serde(default = "default_min_lead_time")]
    pub min_lead_time_minutes: i64,
    /// Forward day-walk bound for alternative search
    #[serde(default = "default_horizon_days")]
    pub search_horizon_days: u32,
    /// Same-day alternatives taken around the rejected time
    #[serde(default = "default_nearby_same_day")]
    pub nearby_same_day: usize,
    /// Upper bound on returned alternatives
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
    /// Hard cap on expanded recurrence occurrences
    #[serde(default = "default_max_occurrences")]
    pub max_occurrences: usize,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            step_minutes: DEFAULT_STEP_MINUTES,
            min_lead_time_minutes: DEFAULT_MIN_LEAD_TIME_MINUTES,
            search_horizon_days: DEFAULT_SEARCH_HORIZON_DAYS,
            nearby_same_day: DEFAULT_NEARBY_SAME_DAY,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
            max_occurrences: MAX_RECURRENCE_OCCURRENCES,
        }
    }
}

const fn default_pool_size() -> u32 {
    DEFAULT_DB_POOL_SIZE
}

const fn default_step_minutes() -> u32 {
    DEFAULT_STEP_MINUTES
}

const fn default_min_lead_time() -> i64 {
    DEFAULT_MIN_LEAD_TIME_MINUTES
}

const fn default_horizon_days() -> u32 {
    DEFAULT_SEARCH_HORIZON_DAYS
}

const fn default_nearby_same_day() -> usize {
    DEFAULT_NEARBY_SAME_DAY
}

const fn default_max_alternatives() -> usize {
    DEFAULT_MAX_ALTERNATIVES
}

const fn default_max_occurrences() -> usize {
    MAX_RECURRENCE_OCCURRENCES
}
