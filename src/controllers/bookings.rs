use tracing::{debug, warn};

use crate::console::IoHandler;
use crate::controllers::{messages, Flow};
use crate::error::BookingError;
use crate::services::BookingSession;
use crate::validation::{parse_ticket_count, prompted, Prompted};

/* ---------- BOOK TICKETS ---------- */

/// Сценарий "[1] Book tickets": количество билетов, выбор мест, подтверждение.
///
/// При любом выходе из сценария неподтверждённая бронь освобождается.
pub async fn book_tickets<IO: IoHandler>(
    io: &mut IO,
    session: &mut BookingSession,
) -> anyhow::Result<Flow> {
    session.start_booking();
    let flow = reserve_and_confirm(io, session).await;
    session.exit_processing();
    flow
}

async fn reserve_and_confirm<IO: IoHandler>(
    io: &mut IO,
    session: &mut BookingSession,
) -> anyhow::Result<Flow> {
    let count = loop {
        io.write_line(messages::INPUT_NUMBER_OF_TICKETS).await?;
        let Some(line) = io.read_line().await? else {
            return Ok(Flow::EndOfInput);
        };

        let count = match parse_ticket_count(&line) {
            Ok(Prompted::Blank) => return Ok(Flow::Continue),
            Ok(Prompted::Value(count)) => count,
            Err(_) => {
                io.write_line(messages::INVALID_NUMBER_OF_TICKETS).await?;
                continue;
            }
        };

        match session.create_default_booking(count) {
            Ok(_) => break count,
            Err(BookingError::ExceedsAvailable { available, .. }) => {
                io.write_line(&messages::only_available(available)).await?;
            }
            Err(e) => return Err(e.into()),
        }
    };

    io.write_line(&messages::successfully_reserved(count, session.movie_title()))
        .await?;

    loop {
        display_current_booking(io, session).await?;

        // Ждём либо пустую строку (подтверждение), либо существующее место
        let label = loop {
            io.write_line(messages::INPUT_SEATING_POSITION).await?;
            let Some(line) = io.read_line().await? else {
                warn!("Input closed while booking was pending");
                return Ok(Flow::EndOfInput);
            };

            match prompted(&line) {
                Err(_) => {
                    debug!("Whitespace-only seating position");
                    io.write_line(messages::INVALID_SEATING_POSITION).await?;
                }
                Ok(Prompted::Blank) => {
                    let booking_id = session.confirm_booking()?;
                    io.write_line(&messages::booking_confirmed(&booking_id)).await?;
                    return Ok(Flow::Continue);
                }
                Ok(Prompted::Value(label)) if session.label_exists(&label) => break label,
                Ok(Prompted::Value(label)) => {
                    debug!(%label, "Unknown seating position");
                    io.write_line(messages::INVALID_SEATING_POSITION).await?;
                }
            }
        };

        match session.change_seating_position(&label) {
            Ok(_) => {}
            Err(BookingError::UnknownLabel(_)) => {
                io.write_line(messages::INVALID_SEATING_POSITION).await?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

async fn display_current_booking<IO: IoHandler>(
    io: &mut IO,
    session: &BookingSession,
) -> anyhow::Result<()> {
    let booking_id = session
        .current_booking()
        .map(|booking| booking.id.clone())
        .ok_or(BookingError::NoPendingBooking)?;
    io.write_line(&messages::booking_id(&booking_id)).await?;
    io.write_line(&session.screen_display()).await?;
    Ok(())
}
