use thiserror::Error;

/// Error for HotelId and RoomId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for hotel field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HotelFieldError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("Rating must be between {min} and {max}, got {actual}")]
    RatingOutOfRange { min: i32, max: i32, actual: i32 },
}

/// Error for room field validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RoomFieldError {
    #[error("Unknown room type: {0}")]
    UnknownType(i32),

    #[error("{field} must be a non-negative amount, got {actual}")]
    InvalidPrice { field: &'static str, actual: f64 },
}

/// Top-level error for all hotel-related operations
#[derive(Debug, Clone, Error)]
pub enum HotelError {
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid hotel: {0}")]
    InvalidHotel(#[from] HotelFieldError),

    #[error("Invalid room: {0}")]
    InvalidRoom(#[from] RoomFieldError),

    #[error("Hotel not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
