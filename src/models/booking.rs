use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{BookingError, Result};
use crate::models::grid::SeatGrid;
use crate::models::seat::{SeatPosition, SeatState};

pub const BOOKING_ID_PREFIX: &str = "GIC";

// Номер брони хранится четырьмя цифрами
const BOOKING_NUMBER_MODULO: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingStatus {
    Reserved,
    Confirmed,
}

impl BookingStatus {
    /// Состояние, в котором обязаны находиться все места брони с этим статусом.
    pub fn seat_state(self) -> SeatState {
        match self {
            BookingStatus::Reserved => SeatState::Reserved,
            BookingStatus::Confirmed => SeatState::Booked,
        }
    }
}

/// Бронь хранит только координаты мест; состояние мест живёт в `SeatGrid`
/// и меняется исключительно через неё.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: String,
    pub status: BookingStatus,
    pub seats: Vec<SeatPosition>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn new(
        id: String,
        status: BookingStatus,
        seats: Vec<SeatPosition>,
        grid: &SeatGrid,
    ) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(BookingError::InvalidConstruction(
                "booking id must not be blank".to_string(),
            ));
        }

        let booking = Self {
            id,
            status,
            seats,
            confirmed_at: None,
        };
        booking.ensure_seats_match(grid)?;
        Ok(booking)
    }

    /// Меняет статус брони и каскадно переводит все её места в соответствующее состояние.
    pub fn update_status(&mut self, status: BookingStatus, grid: &mut SeatGrid) -> Result<()> {
        self.ensure_seats_match(grid)?;

        let state = status.seat_state();
        for position in &self.seats {
            grid.set_state(*position, state);
        }

        self.status = status;
        if status == BookingStatus::Confirmed {
            self.confirmed_at = Some(Utc::now());
        }
        Ok(())
    }

    /// Возвращает места неподтверждённой брони в зал.
    pub fn release_reserved_seats(&mut self, grid: &mut SeatGrid) -> Result<()> {
        if self.status != BookingStatus::Reserved {
            return Err(BookingError::InvalidConstruction(format!(
                "booking {} is {:?}, only reserved bookings can release seats",
                self.id, self.status
            )));
        }

        for position in self.seats.drain(..) {
            grid.set_state(position, SeatState::Empty);
        }
        Ok(())
    }

    pub fn replace_seats(&mut self, seats: Vec<SeatPosition>, grid: &SeatGrid) -> Result<()> {
        let previous = std::mem::replace(&mut self.seats, seats);
        if let Err(e) = self.ensure_seats_match(grid) {
            self.seats = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn seat_labels(&self) -> Vec<String> {
        self.seats.iter().map(SeatPosition::label).collect()
    }

    fn ensure_seats_match(&self, grid: &SeatGrid) -> Result<()> {
        let expected = self.status.seat_state();
        match self
            .seats
            .iter()
            .find(|position| grid.state_at(**position) != Some(expected))
        {
            Some(position) => Err(BookingError::InvalidConstruction(format!(
                "seat {} of {:?} booking {} is not {:?}",
                position, self.status, self.id, expected
            ))),
            None => Ok(()),
        }
    }
}

/// `GIC` + следующий номер брони, дополненный нулями до четырёх цифр.
pub fn generate_booking_id(last_booking_number: u32) -> String {
    let next = (last_booking_number + 1) % BOOKING_NUMBER_MODULO;
    format!("{}{:04}", BOOKING_ID_PREFIX, next)
}
