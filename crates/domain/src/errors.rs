//! Error types used throughout the scheduling engine
//!
//! Two distinct classes are kept apart on purpose:
//! [`SlotbookError`] covers infrastructure and system faults (callers may
//! retry), while [`ScheduleError`] covers recoverable, user-facing request
//! failures (callers must not retry without re-validating). Per-slot
//! availability verdicts are not errors at all; see
//! [`crate::types::RejectionReason`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Infrastructure-level error type for Slotbook
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlotbookError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Slotbook operations
pub type Result<T> = std::result::Result<T, SlotbookError>;

/// Request-level scheduling failure.
///
/// Every variant is a valid, displayable outcome for the caller. The
/// `Store` variant carries the transient infrastructure class through
/// unchanged so the two are never conflated.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("provider not found: {0}")]
    ProviderNotFound(Uuid),

    #[error("service is not active: {0}")]
    ServiceInactive(Uuid),

    #[error("recurrence pattern produced no occurrences")]
    EmptyPattern,

    #[error(transparent)]
    Store(#[from] SlotbookError),
}

impl ScheduleError {
    /// Whether the failure is a transient infrastructure fault that the
    /// caller may retry as-is.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Result type alias for engine-facing scheduling operations
pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
