pub mod allocator;
pub mod catalog;
pub mod session;

pub use catalog::BookingCatalog;
pub use session::{BookingSession, ProcessingMode};
