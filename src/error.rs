use thiserror::Error;

use crate::services::session::ProcessingMode;

pub type Result<T> = std::result::Result<T, BookingError>;

/// Ошибки ядра бронирования.
///
/// `ExceedsAvailable`, `UnknownLabel` и `UnknownBookingId` - штатные,
/// их показывают пользователю и просят повторить ввод. Остальные означают
/// нарушение инварианта или неверную последовательность вызовов.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("there is no row which has at least one empty seat")]
    NoEmptySeat,
    #[error("requested {requested} seats but only {available} seats are available")]
    ExceedsAvailable { requested: usize, available: usize },
    #[error("unknown seating position `{0}`")]
    UnknownLabel(String),
    #[error("booking id `{0}` does not exist")]
    UnknownBookingId(String),
    #[error("invalid booking: {0}")]
    InvalidConstruction(String),
    #[error("there is no pending booking")]
    NoPendingBooking,
    #[error("operation requires {expected:?} mode, session is in {actual:?} mode")]
    WrongMode {
        expected: ProcessingMode,
        actual: ProcessingMode,
    },
}
