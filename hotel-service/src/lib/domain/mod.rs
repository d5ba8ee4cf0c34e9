pub mod hotel;
pub mod user;
