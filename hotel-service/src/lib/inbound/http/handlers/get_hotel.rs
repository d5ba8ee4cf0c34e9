use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::list_hotels::HotelData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::HotelId;
use crate::domain::hotel::ports::HotelServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> Result<ApiSuccess<HotelData>, ApiError> {
    let hotel_id = HotelId::from_string(&hotel_id).map_err(HotelError::from)?;

    state
        .hotel_service
        .get_hotel(&hotel_id)
        .await
        .map_err(ApiError::from)
        .map(|ref hotel| ApiSuccess::new(StatusCode::OK, hotel.into()))
}
