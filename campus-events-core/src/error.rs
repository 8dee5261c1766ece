//! Error types for campus-events.

use thiserror::Error;

/// Errors that can occur in campus-events operations.
#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid max attendees '{0}': expected a positive whole number")]
    InvalidCapacity(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Event '{event_id}' is full ({max} attendees)")]
    CapacityExceeded { event_id: String, max: u32 },

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown role '{0}'")]
    UnknownRole(String),
}

/// Result type alias for campus-events operations.
pub type CampusResult<T> = Result<T, CampusError>;
