use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::ports::HotelServicePort;
use crate::inbound::http::router::AppState;

/// Query string accepted by `GET /api/v1/hotel`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelQueryParams {
    pub rating: Option<i32>,
}

pub async fn list_hotels(
    State(state): State<AppState>,
    params: Result<Query<HotelQueryParams>, QueryRejection>,
) -> Result<ApiSuccess<Vec<HotelData>>, ApiError> {
    let Query(params) = params?;
    let filter = HotelFilter {
        rating: params.rating,
    };

    state
        .hotel_service
        .list_hotels(filter)
        .await
        .map_err(ApiError::from)
        .map(|hotels| ApiSuccess::new(StatusCode::OK, hotels.iter().map(HotelData::from).collect()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelData {
    pub id: String,
    pub name: String,
    pub location: String,
    pub rooms: Vec<String>,
    pub rating: i32,
}

impl From<&Hotel> for HotelData {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id.to_string(),
            name: hotel.name.clone(),
            location: hotel.location.clone(),
            rooms: hotel.rooms.iter().map(ToString::to_string).collect(),
            rating: hotel.rating,
        }
    }
}
