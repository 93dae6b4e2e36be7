use serde::Serialize;
use std::fmt;

// Первая буква ряда; ряд 0 = 'A'
const FIRST_ROW_LETTER: u8 = b'A';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SeatPosition {
    pub row: usize,
    pub col: usize,
}

impl SeatPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Внешняя метка места: буква ряда + номер колонки из двух цифр, например `B03`.
    pub fn label(&self) -> String {
        format!("{}{:02}", row_letter(self.row), self.col + 1)
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub fn row_letter(row: usize) -> char {
    (FIRST_ROW_LETTER + row as u8) as char
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    Empty,
    Reserved,
    Booked,
}

impl SeatState {
    // Символ для отрисовки схемы зала
    pub fn glyph(self) -> char {
        match self {
            SeatState::Empty => '.',
            SeatState::Reserved => 'o',
            SeatState::Booked => '#',
        }
    }
}

#[derive(Debug, Clone)]
pub struct Seat {
    pub position: SeatPosition,
    pub state: SeatState,
}

impl Seat {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            position: SeatPosition::new(row, col),
            state: SeatState::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state == SeatState::Empty
    }

    pub fn update_state(&mut self, state: SeatState) {
        self.state = state;
    }
}

// Места равны, если совпадают ряд и колонка - состояние не учитывается
impl PartialEq for Seat {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Seat {}
