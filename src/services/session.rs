//! session.rs
//!
//! Сессия бронирования: один зал, один каталог подтверждённых броней.
//!
//! Бронь проходит двухфазный цикл: сначала она создаётся как `Reserved`
//! (места помечены `o`), пользователь может сколько угодно раз переставить её
//! от другого места, затем бронь либо подтверждается (места становятся `#`,
//! бронь попадает в каталог), либо отбрасывается (места снова свободны).

use tracing::{debug, info, warn};

use crate::error::{BookingError, Result};
use crate::models::booking::generate_booking_id;
use crate::models::{Booking, BookingStatus, SeatGrid, SeatState};
use crate::services::allocator;
use crate::services::catalog::BookingCatalog;

/// Какой сценарий сейчас выполняется.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingMode {
    Idle,
    Booking,
    Checking,
}

#[derive(Debug)]
pub struct BookingSession {
    movie_title: String,
    grid: SeatGrid,
    catalog: BookingCatalog,
    last_booking_number: u32,
    mode: ProcessingMode,
    current_booking: Option<Booking>,
    // Ключ брони в каталоге, которую сейчас просматривают
    current_checking: Option<String>,
}

impl BookingSession {
    pub fn new(movie_title: impl Into<String>, rows: usize, columns: usize) -> Self {
        let movie_title = movie_title.into();
        info!(%movie_title, rows, columns, "Cinema created");
        Self {
            movie_title,
            grid: SeatGrid::new(rows, columns),
            catalog: BookingCatalog::new(),
            last_booking_number: 0,
            mode: ProcessingMode::Idle,
            current_booking: None,
            current_checking: None,
        }
    }

    pub fn movie_title(&self) -> &str {
        &self.movie_title
    }

    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    pub fn catalog(&self) -> &BookingCatalog {
        &self.catalog
    }

    pub fn available_seats(&self) -> usize {
        self.grid.available_seats()
    }

    pub fn last_booking_number(&self) -> u32 {
        self.last_booking_number
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    pub fn current_booking(&self) -> Option<&Booking> {
        self.current_booking.as_ref()
    }

    pub fn current_checking(&self) -> Option<&Booking> {
        self.current_checking
            .as_deref()
            .and_then(|id| self.catalog.get(id).ok())
    }

    pub fn label_exists(&self, label: &str) -> bool {
        self.grid.label_exists(label)
    }

    pub fn start_booking(&mut self) {
        self.enter(ProcessingMode::Booking);
    }

    pub fn start_checking(&mut self) {
        self.enter(ProcessingMode::Checking);
    }

    /// Создаёт неподтверждённую бронь на `count` мест, выбранных по умолчанию.
    pub fn create_default_booking(&mut self, count: usize) -> Result<&Booking> {
        self.ensure_mode(ProcessingMode::Booking)?;

        // Места текущей неподтверждённой брони будут освобождены перед выбором
        let pending = self.current_booking.as_ref().map_or(0, |booking| booking.seats.len());
        let available = self.grid.available_seats() + pending;
        if count > available {
            warn!(requested = count, available, "Not enough seats for booking");
            return Err(BookingError::ExceedsAvailable {
                requested: count,
                available,
            });
        }

        // Повторный вызов заменяет предыдущую неподтверждённую бронь
        self.release_pending();

        let booking_id = generate_booking_id(self.last_booking_number);
        let seats = allocator::allocate_default(&mut self.grid, count)?;
        let booking = Booking::new(booking_id, BookingStatus::Reserved, seats, &self.grid)?;

        info!(booking_id = %booking.id, seats = ?booking.seat_labels(), "Seats reserved");
        Ok(&*self.current_booking.insert(booking))
    }

    /// Перевыбирает места текущей брони, начиная с места `label`.
    pub fn change_seating_position(&mut self, label: &str) -> Result<&Booking> {
        let booking = self
            .current_booking
            .as_mut()
            .ok_or(BookingError::NoPendingBooking)?;
        let anchor = self.grid.label_to_position(label)?;

        let previous = booking.seats.clone();
        let count = previous.len();
        booking.release_reserved_seats(&mut self.grid)?;

        match allocator::allocate_anchored(&mut self.grid, count, anchor) {
            Ok(seats) => booking.replace_seats(seats, &self.grid)?,
            Err(e) => {
                // Возвращаем прежние места, чтобы бронь не осталась пустой
                for position in &previous {
                    self.grid.set_state(*position, SeatState::Reserved);
                }
                booking.replace_seats(previous, &self.grid)?;
                return Err(e);
            }
        }

        debug!(booking_id = %booking.id, anchor = %anchor, seats = ?booking.seat_labels(), "Seats moved");
        Ok(&*booking)
    }

    /// Подтверждает текущую бронь и возвращает её номер.
    pub fn confirm_booking(&mut self) -> Result<String> {
        let mut booking = self
            .current_booking
            .take()
            .ok_or(BookingError::NoPendingBooking)?;

        if self.catalog.contains(&booking.id) {
            let err = BookingError::InvalidConstruction(format!(
                "booking {} is already stored",
                booking.id
            ));
            self.current_booking = Some(booking);
            return Err(err);
        }

        if let Err(e) = booking.update_status(BookingStatus::Confirmed, &mut self.grid) {
            self.current_booking = Some(booking);
            return Err(e);
        }

        let booking_id = booking.id.clone();
        match serde_json::to_string(&booking) {
            Ok(json) => info!(booking = %json, "Booking confirmed"),
            Err(e) => warn!("Failed to serialize booking {}: {:?}", booking_id, e),
        }

        self.catalog.insert(booking)?;
        self.last_booking_number += 1;
        Ok(booking_id)
    }

    /// Отменяет текущую неподтверждённую бронь, места возвращаются в зал.
    pub fn cancel_booking(&mut self) -> Result<()> {
        let mut booking = self
            .current_booking
            .take()
            .ok_or(BookingError::NoPendingBooking)?;
        booking.release_reserved_seats(&mut self.grid)?;
        info!(booking_id = %booking.id, "Pending booking cancelled");
        Ok(())
    }

    /// Находит подтверждённую бронь для просмотра (без учёта регистра).
    pub fn check_booking(&mut self, booking_id: &str) -> Result<&Booking> {
        self.ensure_mode(ProcessingMode::Checking)?;

        let key = self.catalog.get(booking_id)?.id.clone();
        self.current_checking = Some(key);
        self.catalog.get(booking_id)
    }

    /// Возврат в главное меню. Неподтверждённая бронь при этом освобождается.
    pub fn exit_processing(&mut self) {
        self.release_pending();
        self.current_checking = None;
        self.mode = ProcessingMode::Idle;
    }

    /// Схема зала для текущего сценария: при просмотре брони её места
    /// подсвечиваются поверх реального состояния.
    pub fn screen_display(&self) -> String {
        match (self.mode, self.current_checking()) {
            (ProcessingMode::Checking, Some(booking)) => self.grid.render(Some(booking.seats.as_slice())),
            _ => self.grid.render(None),
        }
    }

    fn enter(&mut self, mode: ProcessingMode) {
        if self.mode != ProcessingMode::Idle {
            debug!(from = ?self.mode, to = ?mode, "Switching mode without exit");
        }
        self.release_pending();
        self.current_checking = None;
        self.mode = mode;
    }

    fn ensure_mode(&self, expected: ProcessingMode) -> Result<()> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(BookingError::WrongMode {
                expected,
                actual: self.mode,
            })
        }
    }

    fn release_pending(&mut self) {
        if let Some(mut booking) = self.current_booking.take() {
            warn!(booking_id = %booking.id, seats = booking.seats.len(), "Releasing abandoned booking");
            if let Err(e) = booking.release_reserved_seats(&mut self.grid) {
                warn!("Failed to release booking {}: {}", booking.id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> BookingSession {
        BookingSession::new("Inception", 8, 10)
    }

    fn lines(display: &str) -> Vec<&str> {
        display.lines().collect()
    }

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = session();
        assert_eq!(session.movie_title(), "Inception");
        assert_eq!(session.available_seats(), 80);
        assert_eq!(session.last_booking_number(), 0);
        assert_eq!(session.mode(), ProcessingMode::Idle);
        assert!(session.catalog().is_empty());
        assert!(session.current_booking().is_none());
        assert!(session.current_checking().is_none());
    }

    #[test]
    fn mode_transitions() {
        let mut session = session();
        session.start_booking();
        assert_eq!(session.mode(), ProcessingMode::Booking);
        session.exit_processing();
        assert_eq!(session.mode(), ProcessingMode::Idle);
        session.start_checking();
        assert_eq!(session.mode(), ProcessingMode::Checking);
        session.exit_processing();
        assert_eq!(session.mode(), ProcessingMode::Idle);
    }

    #[test]
    fn default_booking_reserves_middle_of_row_a() {
        let mut session = session();
        session.start_booking();

        let booking = session.create_default_booking(4).unwrap();
        assert_eq!(booking.id, "GIC0001");
        assert_eq!(booking.status, BookingStatus::Reserved);
        assert_eq!(booking.seats.len(), 4);

        let display = session.screen_display();
        let rows = lines(&display);
        assert_eq!(rows[0], "Selected seats:");
        assert_eq!(rows[1], "S C R E E N");
        assert_eq!(rows[2], "--------------------");
        assert_eq!(rows[3], "H . . . . . . . . . .");
        assert_eq!(rows[10], "A . . . o o o o . . .");
        assert_eq!(rows[11], "  1 2 3 4 5 6 7 8 9 10");
    }

    #[test]
    fn booking_requires_booking_mode() {
        let mut session = session();
        let err = session.create_default_booking(1).unwrap_err();
        assert_eq!(
            err,
            BookingError::WrongMode {
                expected: ProcessingMode::Booking,
                actual: ProcessingMode::Idle,
            }
        );
    }

    #[test]
    fn exceeding_request_changes_nothing() {
        let mut session = session();
        session.start_booking();

        let err = session.create_default_booking(81).unwrap_err();
        assert_eq!(err, BookingError::ExceedsAvailable { requested: 81, available: 80 });
        assert_eq!(session.available_seats(), 80);
        assert!(session.current_booking().is_none());
        assert_eq!(session.last_booking_number(), 0);
    }

    #[test]
    fn change_position_moves_seats() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(4).unwrap();

        let booking = session.change_seating_position("b03").unwrap();
        assert_eq!(booking.id, "GIC0001");
        assert_eq!(booking.seat_labels(), vec!["B03", "B04", "B05", "B06"]);

        let display = session.screen_display();
        assert!(display.contains("B . . o o o o . . . ."));
        assert!(display.contains("A . . . . . . . . . ."));
        assert_eq!(session.available_seats(), 76);
    }

    #[test]
    fn change_position_rejects_unknown_label() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(2).unwrap();

        let err = session.change_seating_position("Z99").unwrap_err();
        assert_eq!(err, BookingError::UnknownLabel("Z99".to_string()));
        assert_eq!(session.current_booking().unwrap().seats.len(), 2);
        assert_eq!(session.available_seats(), 78);
    }

    #[test]
    fn change_position_without_booking_fails() {
        let mut session = session();
        session.start_booking();
        assert_eq!(
            session.change_seating_position("A01").unwrap_err(),
            BookingError::NoPendingBooking
        );
    }

    #[test]
    fn confirm_moves_booking_into_catalog() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(4).unwrap();
        session.change_seating_position("B03").unwrap();

        let booking_id = session.confirm_booking().unwrap();
        assert_eq!(booking_id, "GIC0001");
        assert!(session.current_booking().is_none());
        assert_eq!(session.last_booking_number(), 1);

        let stored = session.catalog().get("GIC0001").unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert!(stored.confirmed_at.is_some());
        assert!(session.screen_display().contains("B . . # # # # . . . ."));
    }

    #[test]
    fn second_booking_gets_next_id() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(1).unwrap();
        session.confirm_booking().unwrap();
        session.exit_processing();

        session.start_booking();
        assert_eq!(session.create_default_booking(1).unwrap().id, "GIC0002");
    }

    #[test]
    fn recreate_counts_pending_seats_as_available() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(50).unwrap();
        assert_eq!(session.available_seats(), 30);

        let booking = session.create_default_booking(60).unwrap();
        assert_eq!(booking.seats.len(), 60);
        assert_eq!(session.available_seats(), 20);
        assert_eq!(session.grid().count_in_state(SeatState::Reserved), 60);

        assert_eq!(
            session.create_default_booking(81).unwrap_err(),
            BookingError::ExceedsAvailable {
                requested: 81,
                available: 80
            }
        );
        assert_eq!(session.grid().count_in_state(SeatState::Reserved), 60);
    }

    #[test]
    fn duplicate_id_on_confirm_keeps_booking_pending() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(2).unwrap();
        session.confirm_booking().unwrap();

        // Счётчик сбит: следующая бронь снова получит GIC0001
        session.last_booking_number = 0;
        session.create_default_booking(3).unwrap();

        let err = session.confirm_booking().unwrap_err();
        assert!(matches!(err, BookingError::InvalidConstruction(_)));
        assert_eq!(session.current_booking().unwrap().status, BookingStatus::Reserved);
        assert_eq!(session.grid().count_in_state(SeatState::Reserved), 3);
        assert_eq!(session.grid().count_in_state(SeatState::Booked), 2);
        assert_eq!(session.catalog().len(), 1);

        session.exit_processing();
        assert_eq!(session.available_seats(), 78);
    }

    #[test]
    fn cancel_releases_seats() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(10).unwrap();
        assert_eq!(session.available_seats(), 70);

        session.cancel_booking().unwrap();
        assert_eq!(session.available_seats(), 80);
        assert!(session.current_booking().is_none());
        assert_eq!(session.cancel_booking().unwrap_err(), BookingError::NoPendingBooking);
    }

    #[test]
    fn exit_releases_abandoned_booking() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(5).unwrap();

        session.exit_processing();
        assert_eq!(session.available_seats(), 80);
        assert!(session.current_booking().is_none());
        assert_eq!(session.last_booking_number(), 0);
    }

    #[test]
    fn check_overlays_confirmed_seats() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(4).unwrap();
        session.confirm_booking().unwrap();
        session.exit_processing();

        session.start_checking();
        let booking = session.check_booking("gic0001").unwrap();
        assert_eq!(booking.id, "GIC0001");
        assert_eq!(session.current_checking().unwrap().id, "GIC0001");

        assert!(session.screen_display().contains("A . . . o o o o . . ."));
        assert_eq!(session.grid().count_in_state(SeatState::Booked), 4);

        session.exit_processing();
        assert!(session.screen_display().contains("A . . . # # # # . . ."));
    }

    #[test]
    fn check_unknown_or_pending_booking_fails() {
        let mut session = session();
        session.start_booking();
        session.create_default_booking(4).unwrap();
        session.exit_processing();

        session.start_checking();
        assert_eq!(
            session.check_booking("GIC0001").unwrap_err(),
            BookingError::UnknownBookingId("GIC0001".to_string())
        );
        assert!(session.current_checking().is_none());
    }
}
