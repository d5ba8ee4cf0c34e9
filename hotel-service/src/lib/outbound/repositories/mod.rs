pub mod hotel;
pub mod memory;
pub mod user;

pub use hotel::PostgresHotelRepository;
pub use hotel::PostgresRoomRepository;
pub use memory::InMemoryHotelRepository;
pub use memory::InMemoryRoomRepository;
pub use memory::InMemoryUserRepository;
pub use user::PostgresUserRepository;
