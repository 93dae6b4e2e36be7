pub mod config;
pub mod console;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod validation;

use chrono::{DateTime, Utc};
use tracing::info;

use services::BookingSession;
use validation::CinemaSetup;

// Состояние одного запуска: один зал, одна сессия
pub struct AppState {
    pub session: BookingSession,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(setup: CinemaSetup) -> Self {
        Self {
            session: BookingSession::new(setup.title, setup.rows, setup.columns),
            started_at: Utc::now(),
        }
    }

    pub fn log_summary(&self) {
        let elapsed = Utc::now().signed_duration_since(self.started_at);
        info!(
            movie_title = %self.session.movie_title(),
            confirmed_bookings = self.session.catalog().len(),
            seats_available = self.session.available_seats(),
            elapsed_secs = elapsed.num_seconds(),
            "Session summary"
        );
    }
}
