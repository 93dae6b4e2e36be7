//! Разбор пользовательского ввода. Ядро бронирования получает только
//! уже проверенные значения и никогда не разбирает строки само.

use thiserror::Error;
use validator::Validate;

use crate::config::CinemaConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid movie title or rows or seats per row")]
    InvalidSetup,
    #[error("invalid menu selection")]
    InvalidMenuSelection,
    #[error("invalid number of tickets")]
    InvalidTicketCount,
    #[error("input consists of whitespace only")]
    WhitespaceOnly,
}

/// Параметры зала из строки `[Title] [Row] [SeatsPerRow]`.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CinemaSetup {
    #[validate(length(min = 1))]
    pub title: String,
    pub rows: usize,
    pub columns: usize,
}

/// Пункт главного меню.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    BookTickets,
    CheckBookings,
    Exit,
}

/// Ответ на приглашение, где пустая строка означает "назад" или "принять".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted<T> {
    Blank,
    Value(T),
}

pub fn parse_cinema_setup(line: &str, limits: &CinemaConfig) -> Result<CinemaSetup, ValidationError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(ValidationError::InvalidSetup);
    }

    // Название может состоять из нескольких слов: последние два токена - размеры
    let (title, sizes) = tokens.split_at(tokens.len() - 2);
    let rows: usize = sizes[0].parse().map_err(|_| ValidationError::InvalidSetup)?;
    let columns: usize = sizes[1].parse().map_err(|_| ValidationError::InvalidSetup)?;

    if !(1..=limits.max_rows).contains(&rows) || !(1..=limits.max_columns).contains(&columns) {
        return Err(ValidationError::InvalidSetup);
    }

    let setup = CinemaSetup {
        title: title.join(" "),
        rows,
        columns,
    };
    setup.validate().map_err(|_| ValidationError::InvalidSetup)?;
    Ok(setup)
}

pub fn parse_menu_selection(line: &str) -> Result<MenuCommand, ValidationError> {
    match line.trim() {
        "1" => Ok(MenuCommand::BookTickets),
        "2" => Ok(MenuCommand::CheckBookings),
        "3" => Ok(MenuCommand::Exit),
        _ => Err(ValidationError::InvalidMenuSelection),
    }
}

pub fn parse_ticket_count(line: &str) -> Result<Prompted<usize>, ValidationError> {
    match prompted(line).map_err(|_| ValidationError::InvalidTicketCount)? {
        Prompted::Blank => Ok(Prompted::Blank),
        Prompted::Value(value) => match value.parse::<usize>() {
            Ok(count) if count > 0 => Ok(Prompted::Value(count)),
            _ => Err(ValidationError::InvalidTicketCount),
        },
    }
}

/// Только по-настоящему пустая строка означает `Prompted::Blank`.
/// Строка из одних пробелов - ошибка, а не согласие.
pub fn prompted(line: &str) -> Result<Prompted<String>, ValidationError> {
    if line.is_empty() {
        return Ok(Prompted::Blank);
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::WhitespaceOnly);
    }
    Ok(Prompted::Value(trimmed.to_ascii_uppercase()))
}
