use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::AddRoomCommand;
use crate::domain::hotel::models::CreateHotelCommand;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::models::Room;
use crate::domain::hotel::models::RoomId;
use crate::domain::hotel::ports::HotelRepository;
use crate::domain::hotel::ports::HotelServicePort;
use crate::domain::hotel::ports::RoomRepository;

/// Domain service implementation for hotel and room operations.
pub struct HotelService<HR, RR>
where
    HR: HotelRepository + ?Sized,
    RR: RoomRepository + ?Sized,
{
    hotel_repository: Arc<HR>,
    room_repository: Arc<RR>,
}

impl<HR, RR> HotelService<HR, RR>
where
    HR: HotelRepository + ?Sized,
    RR: RoomRepository + ?Sized,
{
    pub fn new(hotel_repository: Arc<HR>, room_repository: Arc<RR>) -> Self {
        Self {
            hotel_repository,
            room_repository,
        }
    }
}

#[async_trait]
impl<HR, RR> HotelServicePort for HotelService<HR, RR>
where
    HR: HotelRepository + ?Sized,
    RR: RoomRepository + ?Sized,
{
    async fn create_hotel(&self, command: CreateHotelCommand) -> Result<Hotel, HotelError> {
        let hotel = Hotel {
            id: HotelId::new(),
            name: command.name,
            location: command.location,
            rooms: Vec::new(),
            rating: command.rating,
        };

        let created = self.hotel_repository.create(hotel).await?;
        tracing::info!(hotel_id = %created.id, name = %created.name, "Hotel created");

        Ok(created)
    }

    async fn add_room(
        &self,
        hotel_id: &HotelId,
        command: AddRoomCommand,
    ) -> Result<Room, HotelError> {
        self.get_hotel(hotel_id).await?;

        let room = Room {
            id: RoomId::new(),
            room_type: command.room_type,
            base_price: command.base_price,
            price: command.price,
            hotel_id: *hotel_id,
        };

        let room = self.room_repository.create(room).await?;
        if let Err(e) = self.hotel_repository.push_room(hotel_id, &room.id).await {
            // The room must not outlive a failed link
            if let Err(cleanup) = self.room_repository.delete(&room.id).await {
                tracing::error!(
                    room_id = %room.id,
                    error = %cleanup,
                    "Failed to remove unlinked room"
                );
            }
            return Err(e);
        }
        tracing::info!(hotel_id = %hotel_id, room_id = %room.id, "Room added");

        Ok(room)
    }

    async fn list_hotels(&self, filter: HotelFilter) -> Result<Vec<Hotel>, HotelError> {
        self.hotel_repository.list(filter).await
    }

    async fn get_hotel(&self, id: &HotelId) -> Result<Hotel, HotelError> {
        self.hotel_repository
            .find_by_id(id)
            .await?
            .ok_or(HotelError::NotFound(id.to_string()))
    }

    async fn get_rooms(&self, hotel_id: &HotelId) -> Result<Vec<Room>, HotelError> {
        self.get_hotel(hotel_id).await?;
        self.room_repository.find_by_hotel(hotel_id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::hotel::models::RoomType;

    mock! {
        pub TestHotelRepository {}

        #[async_trait]
        impl HotelRepository for TestHotelRepository {
            async fn create(&self, hotel: Hotel) -> Result<Hotel, HotelError>;
            async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelError>;
            async fn list(&self, filter: HotelFilter) -> Result<Vec<Hotel>, HotelError>;
            async fn push_room(&self, hotel_id: &HotelId, room_id: &RoomId) -> Result<(), HotelError>;
        }
    }

    mock! {
        pub TestRoomRepository {}

        #[async_trait]
        impl RoomRepository for TestRoomRepository {
            async fn create(&self, room: Room) -> Result<Room, HotelError>;
            async fn delete(&self, id: &RoomId) -> Result<(), HotelError>;
            async fn find_by_hotel(&self, hotel_id: &HotelId) -> Result<Vec<Room>, HotelError>;
        }
    }

    fn test_hotel(id: HotelId, rating: i32) -> Hotel {
        Hotel {
            id,
            name: "Bellucia".to_string(),
            location: "France".to_string(),
            rooms: vec![],
            rating,
        }
    }

    #[tokio::test]
    async fn test_create_hotel_starts_without_rooms() {
        let mut hotels = MockTestHotelRepository::new();
        hotels
            .expect_create()
            .withf(|hotel| hotel.rooms.is_empty() && hotel.rating == 3)
            .times(1)
            .returning(|hotel| Ok(hotel));

        let service = HotelService::new(Arc::new(hotels), Arc::new(MockTestRoomRepository::new()));

        let command = CreateHotelCommand::new("Bellucia".into(), "France".into(), 3).unwrap();
        let hotel = service.create_hotel(command).await.unwrap();
        assert_eq!(hotel.name, "Bellucia");
    }

    #[tokio::test]
    async fn test_add_room_links_room_to_hotel() {
        let hotel_id = HotelId::new();

        let mut hotels = MockTestHotelRepository::new();
        hotels
            .expect_find_by_id()
            .times(1)
            .returning(move |id| Ok(Some(test_hotel(*id, 3))));
        hotels
            .expect_push_room()
            .withf(move |id, _| *id == hotel_id)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut rooms = MockTestRoomRepository::new();
        rooms
            .expect_create()
            .withf(move |room| room.hotel_id == hotel_id && room.room_type == RoomType::Deluxe)
            .times(1)
            .returning(|room| Ok(room));

        let service = HotelService::new(Arc::new(hotels), Arc::new(rooms));

        let command = AddRoomCommand::new(RoomType::Deluxe, 199.9, 249.9).unwrap();
        let room = service.add_room(&hotel_id, command).await.unwrap();
        assert_eq!(room.hotel_id, hotel_id);
        assert_eq!(room.price, 249.9);
    }

    #[tokio::test]
    async fn test_add_room_removes_room_when_link_fails() {
        let mut hotels = MockTestHotelRepository::new();
        hotels
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_hotel(*id, 3))));
        hotels
            .expect_push_room()
            .times(1)
            .returning(|_, _| Err(HotelError::DatabaseError("connection reset".to_string())));

        let mut rooms = MockTestRoomRepository::new();
        rooms.expect_create().times(1).returning(|room| Ok(room));
        rooms.expect_delete().times(1).returning(|_| Ok(()));

        let service = HotelService::new(Arc::new(hotels), Arc::new(rooms));

        let command = AddRoomCommand::new(RoomType::Double, 149.9, 149.9).unwrap();
        let result = service.add_room(&HotelId::new(), command).await;
        assert!(matches!(result, Err(HotelError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_add_room_to_missing_hotel() {
        let mut hotels = MockTestHotelRepository::new();
        hotels.expect_find_by_id().times(1).returning(|_| Ok(None));
        hotels.expect_push_room().times(0);

        let mut rooms = MockTestRoomRepository::new();
        rooms.expect_create().times(0);

        let service = HotelService::new(Arc::new(hotels), Arc::new(rooms));

        let command = AddRoomCommand::new(RoomType::Single, 99.9, 99.9).unwrap();
        let result = service.add_room(&HotelId::new(), command).await;
        assert!(matches!(result, Err(HotelError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_hotels_passes_filter() {
        let mut hotels = MockTestHotelRepository::new();
        hotels
            .expect_list()
            .withf(|filter| filter.rating == Some(4))
            .times(1)
            .returning(|_| Ok(vec![test_hotel(HotelId::new(), 4)]));

        let service = HotelService::new(Arc::new(hotels), Arc::new(MockTestRoomRepository::new()));

        let listed = service
            .list_hotels(HotelFilter { rating: Some(4) })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_get_rooms_of_missing_hotel() {
        let mut hotels = MockTestHotelRepository::new();
        hotels.expect_find_by_id().times(1).returning(|_| Ok(None));

        let mut rooms = MockTestRoomRepository::new();
        rooms.expect_find_by_hotel().times(0);

        let service = HotelService::new(Arc::new(hotels), Arc::new(rooms));

        let result = service.get_rooms(&HotelId::new()).await;
        assert!(matches!(result, Err(HotelError::NotFound(_))));
    }
}
