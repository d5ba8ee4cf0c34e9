use std::collections::HashSet;

use crate::domain::hotel::errors::HotelError;
use crate::domain::hotel::models::AddRoomCommand;
use crate::domain::hotel::models::CreateHotelCommand;
use crate::domain::hotel::models::Hotel;
use crate::domain::hotel::models::HotelFilter;
use crate::domain::hotel::models::RoomType;
use crate::domain::hotel::ports::HotelServicePort;

/// Demo hotels as (name, location, rating).
pub const DEMO_HOTELS: [(&str, &str, i32); 3] = [
    ("Bellucia", "France", 3),
    ("The cozy hotel", "The Netherlands", 4),
    ("Dont die in your sleep", "London", 1),
];

/// Rooms every demo hotel receives, with their price.
pub const DEMO_ROOMS: [(RoomType, f64); 4] = [
    (RoomType::Single, 99.9),
    (RoomType::Double, 149.9),
    (RoomType::SeaSide, 199.9),
    (RoomType::Deluxe, 299.9),
];

/// Create the demo hotels and their rooms.
///
/// Hotels whose name is already taken are left alone, so running the
/// seeder again adds nothing.
///
/// # Returns
/// The hotels created by this run
pub async fn seed_demo_hotels(
    hotel_service: &dyn HotelServicePort,
) -> Result<Vec<Hotel>, HotelError> {
    let existing: HashSet<String> = hotel_service
        .list_hotels(HotelFilter::default())
        .await?
        .into_iter()
        .map(|hotel| hotel.name)
        .collect();

    let mut created = Vec::new();
    for (name, location, rating) in DEMO_HOTELS {
        if existing.contains(name) {
            tracing::info!(name, "Hotel already present");
            continue;
        }

        let command = CreateHotelCommand::new(name.to_string(), location.to_string(), rating)?;
        let hotel = hotel_service.create_hotel(command).await?;

        for (room_type, price) in DEMO_ROOMS {
            hotel_service
                .add_room(&hotel.id, AddRoomCommand::new(room_type, price, price)?)
                .await?;
        }

        tracing::info!(hotel_id = %hotel.id, name, rooms = DEMO_ROOMS.len(), "Hotel seeded");
        created.push(hotel);
    }

    Ok(created)
}
