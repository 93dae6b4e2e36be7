use std::collections::HashMap;

use crate::error::BookingError;
use crate::models::seat::{row_letter, Seat, SeatPosition, SeatState};

/// Схема зала: матрица `rows x columns` мест и индекс "метка -> координата".
///
/// Индекс строится один раз при создании и дальше не меняется.
/// Диапазоны `rows`/`columns` проверяет слой валидации ввода.
#[derive(Debug, Clone)]
pub struct SeatGrid {
    seats: Vec<Vec<Seat>>,
    index: HashMap<String, SeatPosition>,
    columns: usize,
}

impl SeatGrid {
    pub fn new(rows: usize, columns: usize) -> Self {
        let seats: Vec<Vec<Seat>> = (0..rows)
            .map(|row| (0..columns).map(|col| Seat::new(row, col)).collect())
            .collect();

        let index = seats
            .iter()
            .flatten()
            .map(|seat| (seat.position.label(), seat.position))
            .collect();

        Self { seats, index, columns }
    }

    pub fn rows(&self) -> usize {
        self.seats.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn seat(&self, position: SeatPosition) -> Option<&Seat> {
        self.seats.get(position.row).and_then(|row| row.get(position.col))
    }

    pub fn state_at(&self, position: SeatPosition) -> Option<SeatState> {
        self.seat(position).map(|seat| seat.state)
    }

    pub fn is_empty_at(&self, position: SeatPosition) -> bool {
        self.state_at(position) == Some(SeatState::Empty)
    }

    // Координаты вне сетки молча игнорируются: их выдаёт только сам аллокатор
    pub fn set_state(&mut self, position: SeatPosition, state: SeatState) {
        if let Some(seat) = self
            .seats
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.col))
        {
            seat.update_state(state);
        }
    }

    pub fn row_has_empty_seat(&self, row: usize) -> bool {
        self.seats
            .get(row)
            .is_some_and(|seats| seats.iter().any(Seat::is_empty))
    }

    /// Количество свободных мест, пересчитывается при каждом вызове.
    pub fn available_seats(&self) -> usize {
        self.count_in_state(SeatState::Empty)
    }

    pub fn count_in_state(&self, state: SeatState) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|seat| seat.state == state)
            .count()
    }

    pub fn label_exists(&self, label: &str) -> bool {
        self.index.contains_key(&label.to_ascii_uppercase())
    }

    pub fn label_to_position(&self, label: &str) -> Result<SeatPosition, BookingError> {
        self.index
            .get(&label.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| BookingError::UnknownLabel(label.to_string()))
    }

    /// Текстовая схема зала.
    ///
    /// `highlight` - места просматриваемой брони: рисуются как `o`
    /// независимо от реального состояния, сетка при этом не меняется.
    pub fn render(&self, highlight: Option<&[SeatPosition]>) -> String {
        let mut lines = Vec::with_capacity(self.rows() + 4);
        lines.push("Selected seats:".to_string());
        lines.push(spaced("SCREEN".chars()));
        lines.push("-".repeat(self.columns * 2));

        for row in self.seats.iter().rev() {
            let glyphs = row.iter().map(|seat| {
                let highlighted = highlight.is_some_and(|h| h.contains(&seat.position));
                if highlighted {
                    SeatState::Reserved.glyph()
                } else {
                    seat.state.glyph()
                }
            });
            let row_index = row.first().map(|seat| seat.position.row).unwrap_or_default();
            lines.push(spaced(std::iter::once(row_letter(row_index)).chain(glyphs)));
        }

        let numbers: Vec<String> = (1..=self.columns).map(|col| col.to_string()).collect();
        lines.push(format!("  {}", numbers.join(" ")));

        lines.join("\n")
    }
}

fn spaced(chars: impl Iterator<Item = char>) -> String {
    chars.map(String::from).collect::<Vec<_>>().join(" ")
}
