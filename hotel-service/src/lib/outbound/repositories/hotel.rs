use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::models::Room;
use crate::domain::hotel::models::RoomId;
use crate::domain::hotel::models::RoomType;
use crate::domain::hotel::ports::HotelRepository;
use crate::domain::hotel::ports::RoomRepository;

pub struct PostgresHotelRepository {
    pool: PgPool,
}

impl PostgresHotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelRepository for PostgresHotelRepository {
    async fn create(&self, hotel: Hotel) -> Result<Hotel, HotelError> {
        let room_ids: Vec<Uuid> = hotel.rooms.iter().map(|id| id.0).collect();

        sqlx::query(
            r#"
            INSERT INTO hotels (id, name, location, room_ids, rating)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(hotel.id.0)
        .bind(&hotel.name)
        .bind(&hotel.location)
        .bind(&room_ids)
        .bind(hotel.rating)
        .execute(&self.pool)
        .await
        .map_err(|e| HotelError::DatabaseError(e.to_string()))?;

        Ok(hotel)
    }

    async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelError> {
        let row = sqlx::query_as::<_, HotelRow>(
            r#"
            SELECT id, name, location, room_ids, rating
            FROM hotels
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| HotelError::DatabaseError(e.to_string()))?;

        Ok(row.map(HotelRow::into_hotel))
    }

    async fn list(&self, filter: HotelFilter) -> Result<Vec<Hotel>, HotelError> {
        let rows = sqlx::query_as::<_, HotelRow>(
            r#"
            SELECT id, name, location, room_ids, rating
            FROM hotels
            WHERE $1::INT4 IS NULL OR rating = $1
            ORDER BY name
            "#,
        )
        .bind(filter.rating)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HotelError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(HotelRow::into_hotel).collect())
    }

    async fn push_room(&self, hotel_id: &HotelId, room_id: &RoomId) -> Result<(), HotelError> {
        let result = sqlx::query(
            r#"
            UPDATE hotels
            SET room_ids = array_append(room_ids, $2)
            WHERE id = $1
            "#,
        )
        .bind(hotel_id.0)
        .bind(room_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| HotelError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(HotelError::NotFound(hotel_id.to_string()));
        }

        Ok(())
    }
}

pub struct PostgresRoomRepository {
    pool: PgPool,
}

impl PostgresRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepository {
    async fn create(&self, room: Room) -> Result<Room, HotelError> {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, room_type, base_price, price, hotel_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(room.id.0)
        .bind(room.room_type.code())
        .bind(room.base_price)
        .bind(room.price)
        .bind(room.hotel_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return HotelError::NotFound(room.hotel_id.to_string());
                }
            }
            HotelError::DatabaseError(e.to_string())
        })?;

        Ok(room)
    }

    async fn delete(&self, id: &RoomId) -> Result<(), HotelError> {
        sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| HotelError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_hotel(&self, hotel_id: &HotelId) -> Result<Vec<Room>, HotelError> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, room_type, base_price, price, hotel_id
            FROM rooms
            WHERE hotel_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(hotel_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HotelError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(RoomRow::into_room).collect()
    }
}

#[derive(sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    name: String,
    location: String,
    room_ids: Vec<Uuid>,
    rating: i32,
}

impl HotelRow {
    fn into_hotel(self) -> Hotel {
        Hotel {
            id: HotelId(self.id),
            name: self.name,
            location: self.location,
            rooms: self.room_ids.into_iter().map(RoomId).collect(),
            rating: self.rating,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    room_type: i32,
    base_price: f64,
    price: f64,
    hotel_id: Uuid,
}

impl RoomRow {
    fn into_room(self) -> Result<Room, HotelError> {
        Ok(Room {
            id: RoomId(self.id),
            room_type: RoomType::try_from(self.room_type)?,
            base_price: self.base_price,
            price: self.price,
            hotel_id: HotelId(self.hotel_id),
        })
    }
}
