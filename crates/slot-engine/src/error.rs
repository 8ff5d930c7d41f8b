//! Error types for slot-engine operations.

use thiserror::Error;

/// Reasons a scheduling request is rejected before any search runs.
///
/// Variants are listed in the order the validator checks them; the first
/// failing check is the one reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one participant is required")]
    EmptyParticipants,

    #[error("participant ID cannot be empty")]
    EmptyParticipantId,

    #[error("duplicate participant ID: {0}")]
    DuplicateParticipant(String),

    #[error("duration must be between 1 and {max} minutes, got {got}")]
    InvalidDuration { got: i64, max: u32 },

    #[error("start time is required")]
    MissingStartTime,

    #[error("end time is required")]
    MissingEndTime,

    #[error("start time must be before end time")]
    StartAfterEnd,

    #[error("start time cannot be in the past")]
    StartInPast,

    #[error("end time cannot be more than {months} months in the future")]
    EndBeyondOneYear { months: u32 },

    #[error("duration does not fit within the specified time range")]
    DurationExceedsRange,
}

/// Invalid engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Failure reported by a [`CalendarStore`](crate::service::CalendarStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Calendar store error: {0}")]
pub struct StoreError(pub String);

/// Errors from the booking flow in [`crate::service`].
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("no available time slot found for all participants")]
    NoAvailableSlot,

    #[error("no meetings found for the specified user and time window")]
    NoEventsFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
