//! In-process repositories.
//!
//! Same observable behavior as the PostgreSQL adapters, held in
//! `RwLock<HashMap>`s. Used by the integration tests and by the server when
//! no database URL is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::models::Room;
use crate::domain::hotel::models::RoomId;
use crate::domain::hotel::ports::HotelRepository;
use crate::domain::hotel::ports::RoomRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryHotelRepository {
    hotels: RwLock<HashMap<HotelId, Hotel>>,
}

impl InMemoryHotelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    async fn create(&self, hotel: Hotel) -> Result<Hotel, HotelError> {
        self.hotels.write().await.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelError> {
        Ok(self.hotels.read().await.get(id).cloned())
    }

    async fn list(&self, filter: HotelFilter) -> Result<Vec<Hotel>, HotelError> {
        let mut hotels: Vec<Hotel> = self
            .hotels
            .read()
            .await
            .values()
            .filter(|hotel| filter.matches(hotel))
            .cloned()
            .collect();
        hotels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hotels)
    }

    async fn push_room(&self, hotel_id: &HotelId, room_id: &RoomId) -> Result<(), HotelError> {
        let mut hotels = self.hotels.write().await;
        let hotel = hotels
            .get_mut(hotel_id)
            .ok_or(HotelError::NotFound(hotel_id.to_string()))?;
        hotel.rooms.push(*room_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: RwLock<Vec<Room>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, room: Room) -> Result<Room, HotelError> {
        self.rooms.write().await.push(room.clone());
        Ok(room)
    }

    async fn delete(&self, id: &RoomId) -> Result<(), HotelError> {
        self.rooms.write().await.retain(|room| room.id != *id);
        Ok(())
    }

    async fn find_by_hotel(&self, hotel_id: &HotelId) -> Result<Vec<Room>, HotelError> {
        Ok(self
            .rooms
            .read()
            .await
            .iter()
            .filter(|room| room.hotel_id == *hotel_id)
            .cloned()
            .collect())
    }
}
