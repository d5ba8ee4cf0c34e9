pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod seed;

pub use domain::hotel;
pub use domain::user;
pub use outbound::repositories;
