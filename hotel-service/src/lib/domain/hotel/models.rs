use std::fmt;

use uuid::Uuid;

use crate::domain::hotel::errors::HotelFieldError;
use crate::domain::hotel::errors::IdError;
use crate::domain::hotel::errors::RoomFieldError;

/// Hotel unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotelId(pub Uuid);

impl HotelId {
    /// Generate a new random hotel ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a hotel ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s)
            .map(HotelId)
            .map_err(|e| IdError::InvalidFormat(e.to_string()))
    }
}

impl Default for HotelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Room unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(pub Uuid);

impl RoomId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Hotel aggregate.
///
/// `rooms` lists the ids of every room added to the hotel, in insertion
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub location: String,
    pub rooms: Vec<RoomId>,
    pub rating: i32,
}

/// Room categories, numbered as stored and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomType {
    Single = 1,
    Double = 2,
    SeaSide = 3,
    Deluxe = 4,
}

impl RoomType {
    /// Numeric code of this room type.
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for RoomType {
    type Error = RoomFieldError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(RoomType::Single),
            2 => Ok(RoomType::Double),
            3 => Ok(RoomType::SeaSide),
            4 => Ok(RoomType::Deluxe),
            other => Err(RoomFieldError::UnknownType(other)),
        }
    }
}

/// A bookable room belonging to exactly one hotel.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    pub base_price: f64,
    pub price: f64,
    pub hotel_id: HotelId,
}

/// Command to create a new hotel with validated fields
#[derive(Debug, Clone)]
pub struct CreateHotelCommand {
    pub name: String,
    pub location: String,
    pub rating: i32,
}

impl CreateHotelCommand {
    const MIN_RATING: i32 = 0;
    const MAX_RATING: i32 = 5;

    /// Construct a new create hotel command.
    ///
    /// # Arguments
    /// * `name` - Hotel name (non-empty)
    /// * `location` - Hotel location (non-empty)
    /// * `rating` - Star rating between 0 and 5
    ///
    /// # Errors
    /// * `Empty` - Name or location is blank
    /// * `RatingOutOfRange` - Rating outside 0..=5
    pub fn new(name: String, location: String, rating: i32) -> Result<Self, HotelFieldError> {
        if name.trim().is_empty() {
            return Err(HotelFieldError::Empty("name"));
        }
        if location.trim().is_empty() {
            return Err(HotelFieldError::Empty("location"));
        }
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&rating) {
            return Err(HotelFieldError::RatingOutOfRange {
                min: Self::MIN_RATING,
                max: Self::MAX_RATING,
                actual: rating,
            });
        }

        Ok(Self {
            name,
            location,
            rating,
        })
    }
}

/// Command to add a room to an existing hotel
#[derive(Debug, Clone)]
pub struct AddRoomCommand {
    pub room_type: RoomType,
    pub base_price: f64,
    pub price: f64,
}

impl AddRoomCommand {
    /// # Errors
    /// * `InvalidPrice` - A price is negative or not a finite number
    pub fn new(room_type: RoomType, base_price: f64, price: f64) -> Result<Self, RoomFieldError> {
        for (field, actual) in [("basePrice", base_price), ("price", price)] {
            if !actual.is_finite() || actual < 0.0 {
                return Err(RoomFieldError::InvalidPrice { field, actual });
            }
        }

        Ok(Self {
            room_type,
            base_price,
            price,
        })
    }
}

/// Criteria for listing hotels. Unset fields match every hotel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotelFilter {
    pub rating: Option<i32>,
}

impl HotelFilter {
    pub fn matches(&self, hotel: &Hotel) -> bool {
        self.rating.map_or(true, |rating| hotel.rating == rating)
    }
}
