pub mod auth;
pub mod bookings;
pub mod events;
pub mod spaces;
pub mod users;
