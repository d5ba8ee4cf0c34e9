use async_trait::async_trait;

use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::AddRoomCommand;
use crate::domain::hotel::models::CreateHotelCommand;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::models::Room;
use crate::domain::hotel::models::RoomId;

/// Port for hotel domain service operations.
#[async_trait]
pub trait HotelServicePort: Send + Sync + 'static {
    /// Create a hotel with no rooms.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_hotel(&self, command: CreateHotelCommand) -> Result<Hotel, HotelError>;

    /// Add a room to an existing hotel.
    ///
    /// # Arguments
    /// * `hotel_id` - Hotel receiving the room
    /// * `command` - Validated room type and prices
    ///
    /// # Returns
    /// Created room; its id is appended to the hotel's room list
    ///
    /// # Errors
    /// * `NotFound` - Hotel does not exist
    /// * `DatabaseError` - Database operation failed
    async fn add_room(&self, hotel_id: &HotelId, command: AddRoomCommand)
        -> Result<Room, HotelError>;

    /// List hotels matching a filter.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_hotels(&self, filter: HotelFilter) -> Result<Vec<Hotel>, HotelError>;

    /// Retrieve hotel by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Hotel does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_hotel(&self, id: &HotelId) -> Result<Hotel, HotelError>;

    /// Retrieve every room of a hotel.
    ///
    /// # Errors
    /// * `NotFound` - Hotel does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_rooms(&self, hotel_id: &HotelId) -> Result<Vec<Room>, HotelError>;
}

/// Persistence operations for hotel aggregate.
#[async_trait]
pub trait HotelRepository: Send + Sync + 'static {
    /// Persist new hotel to storage.
    async fn create(&self, hotel: Hotel) -> Result<Hotel, HotelError>;

    /// Retrieve hotel by identifier.
    ///
    /// # Returns
    /// Optional hotel entity (None if not found)
    async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelError>;

    /// Retrieve hotels matching a filter.
    async fn list(&self, filter: HotelFilter) -> Result<Vec<Hotel>, HotelError>;

    /// Append a room id to a hotel's room list.
    ///
    /// # Errors
    /// * `NotFound` - Hotel does not exist
    /// * `DatabaseError` - Database operation failed
    async fn push_room(&self, hotel_id: &HotelId, room_id: &RoomId) -> Result<(), HotelError>;
}

/// Persistence operations for rooms.
#[async_trait]
pub trait RoomRepository: Send + Sync + 'static {
    /// Persist new room to storage.
    async fn create(&self, room: Room) -> Result<Room, HotelError>;

    /// Remove a room. Removing a room that does not exist is not an error.
    async fn delete(&self, id: &RoomId) -> Result<(), HotelError>;

    /// Retrieve every room belonging to a hotel.
    async fn find_by_hotel(&self, hotel_id: &HotelId) -> Result<Vec<Room>, HotelError>;
}
