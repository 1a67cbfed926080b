pub mod user;
pub mod space;
pub mod event;
pub mod booking;

pub use user::{Role, User};
pub use space::Space;
pub use event::{Event, EventListing};
pub use booking::{Booking, BookingListing, BookingTarget};
