pub mod messages;
pub mod bookings;
pub mod checks;

use tracing::{debug, info};

use crate::config::{CinemaConfig, Config};
use crate::console::IoHandler;
use crate::validation::{parse_cinema_setup, parse_menu_selection, CinemaSetup, MenuCommand};
use crate::AppState;

/// Чем закончился сценарий: можно вернуться в меню или ввод исчерпан.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    EndOfInput,
}

/// Полный цикл работы: создание зала, главное меню, выход.
pub async fn run<IO: IoHandler>(io: &mut IO, config: &Config) -> anyhow::Result<()> {
    if let Some(setup) = create_cinema(io, &config.cinema).await? {
        let mut state = AppState::new(setup);
        main_menu(io, &mut state).await?;
        state.log_summary();
    }

    io.write_line(messages::GOODBYE).await?;
    io.terminate().await?;
    info!("Session finished");
    Ok(())
}

async fn create_cinema<IO: IoHandler>(
    io: &mut IO,
    limits: &CinemaConfig,
) -> anyhow::Result<Option<CinemaSetup>> {
    io.write_line(messages::BEGIN).await?;
    loop {
        let Some(line) = io.read_line().await? else {
            return Ok(None);
        };
        match parse_cinema_setup(&line, limits) {
            Ok(setup) => return Ok(Some(setup)),
            Err(e) => {
                debug!(input = %line, "Rejected cinema setup: {}", e);
                io.write_line(messages::INVALID_SETUP).await?;
            }
        }
    }
}

async fn main_menu<IO: IoHandler>(io: &mut IO, state: &mut AppState) -> anyhow::Result<()> {
    loop {
        let Some(command) = select_command(io, state).await? else {
            return Ok(());
        };

        let flow = match command {
            MenuCommand::BookTickets => bookings::book_tickets(io, &mut state.session).await?,
            MenuCommand::CheckBookings => checks::check_bookings(io, &mut state.session).await?,
            MenuCommand::Exit => return Ok(()),
        };

        if flow == Flow::EndOfInput {
            return Ok(());
        }
    }
}

async fn select_command<IO: IoHandler>(
    io: &mut IO,
    state: &AppState,
) -> anyhow::Result<Option<MenuCommand>> {
    let menu = messages::welcome(state.session.movie_title(), state.session.available_seats());
    loop {
        io.write_line(&menu).await?;
        io.write_line(messages::SELECT_PROMPT).await?;
        let Some(line) = io.read_line().await? else {
            return Ok(None);
        };
        match parse_menu_selection(&line) {
            Ok(command) => {
                debug!(?command, "Menu selection");
                return Ok(Some(command));
            }
            Err(_) => io.write_line(messages::INVALID_MENU_SELECTION).await?,
        }
    }
}
