use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::models::Room;
use crate::domain::hotel::ports::HotelServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_hotel_rooms(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> Result<ApiSuccess<Vec<RoomData>>, ApiError> {
    let hotel_id = HotelId::from_string(&hotel_id).map_err(HotelError::from)?;

    state
        .hotel_service
        .get_rooms(&hotel_id)
        .await
        .map_err(ApiError::from)
        .map(|rooms| ApiSuccess::new(StatusCode::OK, rooms.iter().map(RoomData::from).collect()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomData {
    pub id: String,
    #[serde(rename = "type")]
    pub room_type: i32,
    #[serde(rename = "basePrice")]
    pub base_price: f64,
    pub price: f64,
    #[serde(rename = "hotelID")]
    pub hotel_id: String,
}

impl From<&Room> for RoomData {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            room_type: room.room_type.code(),
            base_price: room.base_price,
            price: room.price,
            hotel_id: room.hotel_id.to_string(),
        }
    }
}
