use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SlotwiseError {
    #[error("Time slot not found: {0}")]
    SlotNotFound(Uuid),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(Uuid),

    #[error("Service not found: {0}")]
    ServiceNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Time slot is already booked: {0}")]
    SlotAlreadyBooked(Uuid),

    #[error("Invalid slot window: start {start} is not before end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type SlotwiseResult<T> = Result<T, SlotwiseError>;
