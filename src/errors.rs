use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Invalid time format: {0:?} (expected HH:MM)")]
    InvalidTimeFormat(String),
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Time slot already booked")]
    SlotConflict { conflicting: Option<Uuid> },
    #[error("Date lies in the past")]
    DateInPast,
    #[error("Unknown venue: {0}")]
    UnknownVenue(String),
    #[error("Booking not found: {0}")]
    NotFound(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
