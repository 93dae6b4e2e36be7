pub mod seat;
pub mod grid;
pub mod booking;

pub use seat::{Seat, SeatPosition, SeatState};
pub use grid::SeatGrid;
pub use booking::{Booking, BookingStatus};
