//! allocator.rs
//!
//! Выбор мест под бронь. Обе точки входа помечают выбранные места в сетке
//! как `Reserved` и возвращают их в порядке захвата (не в порядке на схеме).
//!
//! 1.  **По умолчанию** (`allocate_default`): начинаем с самого дальнего от экрана
//!     ряда со свободным местом (ряд `A`, индекс 0) и заполняем ряды от середины
//!     к краям, двигаясь к экрану (`row + 1`).
//! 2.  **От выбранного места** (`allocate_anchored`): сначала занимаем ряд вправо
//!     от выбранной колонки, затем добираем места от середины в рядах ближе
//!     к экрану, потом в рядах дальше от экрана и в последнюю очередь в самом
//!     ряду якоря.
//!
//! Порядок захвата колонок в ряду: середина `(columns - 1) / 2`, затем по очереди
//! правее и левее середины.

use tracing::debug;

use crate::error::{BookingError, Result};
use crate::models::{SeatGrid, SeatPosition, SeatState};

/// Индекс самого дальнего от экрана ряда, где есть хотя бы одно свободное место.
pub fn furthest_row_with_empty_seat(grid: &SeatGrid) -> Result<usize> {
    (0..grid.rows())
        .find(|row| grid.row_has_empty_seat(*row))
        .ok_or(BookingError::NoEmptySeat)
}

/// Выбор мест по умолчанию.
///
/// Проверку `count <= available_seats` делает вызывающая сторона.
pub fn allocate_default(grid: &mut SeatGrid, count: usize) -> Result<Vec<SeatPosition>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut claimed = Vec::with_capacity(count);
    let mut row = furthest_row_with_empty_seat(grid)?;

    while claimed.len() < count {
        if row >= grid.rows() {
            rollback(grid, &claimed);
            return Err(BookingError::NoEmptySeat);
        }
        fill_row_middle_out(grid, row, count, &mut claimed);
        row += 1;
    }

    debug!(count, start_row = ?claimed.first().map(|p| p.row), "default allocation done");
    Ok(claimed)
}

/// Выбор мест от заданного места `anchor`.
pub fn allocate_anchored(
    grid: &mut SeatGrid,
    count: usize,
    anchor: SeatPosition,
) -> Result<Vec<SeatPosition>> {
    if anchor.row >= grid.rows() || anchor.col >= grid.columns() {
        return Err(BookingError::UnknownLabel(anchor.label()));
    }

    let mut claimed = Vec::with_capacity(count);
    fill_row_rightward(grid, anchor, count, &mut claimed);

    for row in fallback_rows(anchor.row, grid.rows()) {
        if claimed.len() >= count {
            break;
        }
        fill_row_middle_out(grid, row, count, &mut claimed);
    }

    if claimed.len() < count {
        rollback(grid, &claimed);
        return Err(BookingError::NoEmptySeat);
    }

    debug!(count, anchor = %anchor, "anchored allocation done");
    Ok(claimed)
}

// Ряды ближе к экрану, затем дальше от экрана, затем сам ряд якоря
fn fallback_rows(anchor_row: usize, rows: usize) -> impl Iterator<Item = usize> {
    (anchor_row + 1..rows)
        .chain((0..anchor_row).rev())
        .chain(std::iter::once(anchor_row))
}

fn fill_row_middle_out(
    grid: &mut SeatGrid,
    row: usize,
    count: usize,
    claimed: &mut Vec<SeatPosition>,
) {
    let columns = grid.columns();
    if columns == 0 {
        return;
    }

    let mid = (columns - 1) / 2;
    claim(grid, SeatPosition::new(row, mid), count, claimed);

    let mut offset = 1;
    while claimed.len() < count && (mid + offset < columns || offset <= mid) {
        if mid + offset < columns {
            claim(grid, SeatPosition::new(row, mid + offset), count, claimed);
        }
        if offset <= mid {
            claim(grid, SeatPosition::new(row, mid - offset), count, claimed);
        }
        offset += 1;
    }
}

fn fill_row_rightward(
    grid: &mut SeatGrid,
    start: SeatPosition,
    count: usize,
    claimed: &mut Vec<SeatPosition>,
) {
    for col in start.col..grid.columns() {
        if claimed.len() >= count {
            break;
        }
        claim(grid, SeatPosition::new(start.row, col), count, claimed);
    }
}

fn claim(grid: &mut SeatGrid, position: SeatPosition, count: usize, claimed: &mut Vec<SeatPosition>) {
    if claimed.len() < count && grid.is_empty_at(position) {
        grid.set_state(position, SeatState::Reserved);
        claimed.push(position);
    }
}

fn rollback(grid: &mut SeatGrid, claimed: &[SeatPosition]) {
    for position in claimed {
        grid.set_state(*position, SeatState::Empty);
    }
}
