use tracing::debug;

use crate::console::IoHandler;
use crate::controllers::{messages, Flow};
use crate::error::BookingError;
use crate::services::BookingSession;
use crate::validation::{prompted, Prompted};

/* ---------- CHECK BOOKINGS ---------- */

/// Сценарий "[2] Check bookings": показывает места подтверждённых броней,
/// пока пользователь не введёт пустую строку.
pub async fn check_bookings<IO: IoHandler>(
    io: &mut IO,
    session: &mut BookingSession,
) -> anyhow::Result<Flow> {
    session.start_checking();
    let flow = lookup_loop(io, session).await;
    session.exit_processing();
    flow
}

async fn lookup_loop<IO: IoHandler>(
    io: &mut IO,
    session: &mut BookingSession,
) -> anyhow::Result<Flow> {
    loop {
        io.write_line(messages::INPUT_BOOKING_ID).await?;
        let Some(line) = io.read_line().await? else {
            return Ok(Flow::EndOfInput);
        };

        let booking_id = match prompted(&line) {
            Ok(Prompted::Blank) => return Ok(Flow::Continue),
            Ok(Prompted::Value(booking_id)) => booking_id,
            Err(_) => {
                io.write_line(messages::INVALID_BOOKING_ID).await?;
                continue;
            }
        };

        match session.check_booking(&booking_id) {
            Ok(booking) => {
                let id = booking.id.clone();
                io.write_line(&messages::booking_id(&id)).await?;
                io.write_line(&session.screen_display()).await?;
            }
            Err(BookingError::UnknownBookingId(id)) => {
                debug!(booking_id = %id, "Booking lookup miss");
                io.write_line(&messages::booking_not_found(&id)).await?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
