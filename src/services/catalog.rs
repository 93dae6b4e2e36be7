use std::collections::HashMap;

use tracing::info;

use crate::error::{BookingError, Result};
use crate::models::{Booking, BookingStatus};

/// Подтверждённые брони за время жизни процесса. Записи только добавляются.
#[derive(Debug, Default, Clone)]
pub struct BookingCatalog {
    bookings: HashMap<String, Booking>,
}

impl BookingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, booking: Booking) -> Result<()> {
        if booking.status != BookingStatus::Confirmed {
            return Err(BookingError::InvalidConstruction(format!(
                "only confirmed bookings can be stored, {} is {:?}",
                booking.id, booking.status
            )));
        }

        let key = normalize(&booking.id);
        if self.bookings.contains_key(&key) {
            return Err(BookingError::InvalidConstruction(format!(
                "booking {} is already stored",
                booking.id
            )));
        }

        info!(booking_id = %booking.id, seats = booking.seats.len(), "Booking stored in catalog");
        self.bookings.insert(key, booking);
        Ok(())
    }

    /// Поиск без учёта регистра.
    pub fn get(&self, booking_id: &str) -> Result<&Booking> {
        self.bookings
            .get(&normalize(booking_id))
            .ok_or_else(|| BookingError::UnknownBookingId(booking_id.to_string()))
    }

    pub fn contains(&self, booking_id: &str) -> bool {
        self.bookings.contains_key(&normalize(booking_id))
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

fn normalize(booking_id: &str) -> String {
    booking_id.trim().to_ascii_uppercase()
}
