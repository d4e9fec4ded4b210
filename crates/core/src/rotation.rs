//! Rotation resolver - 90° rotation with wall kicks and exact revert
//!
//! The transform is shared by every shape; only the pivot policy differs. Rotation first
//! turns the cells in place, then tries each wall-kick offset for the transition as a
//! regular move. If no offset fits, the piece gets back the exact cells and rotation index
//! it had before the call.

use tracing::trace;

use crate::board::Board;
use crate::catalog::{PivotPolicy, ShapeCells};
use crate::piece::Piece;
use crate::types::{Point, RotationDirection, ROTATION_STATES};

/// `[cos, sin, -sin, cos]` for 90°
pub const ROTATION_MATRIX: [i32; 4] = [0, 1, -1, 0];

/// Map `value` cyclically into `[min, max)`
///
/// ```
/// use tetromino_rules_core::rotation::wrap;
///
/// assert_eq!(wrap(4, 0, 4), 0);
/// assert_eq!(wrap(-1, 0, 4), 3);
/// assert_eq!(wrap(-8, 0, 8), 0);
/// assert_eq!(wrap(9, 0, 8), 1);
/// ```
pub fn wrap(value: i32, min: i32, max: i32) -> i32 {
    min + (value - min).rem_euclid(max - min)
}

/// Ceiling of `doubled / 2`
fn ceil_half(doubled: i32) -> i32 {
    (doubled + 1).div_euclid(2)
}

/// Rotate a single cell offset 90° in `direction`.
///
/// Cell-corner shapes are shifted by half a unit before the matrix and rounded up after.
/// The arithmetic runs on doubled coordinates so the half unit stays exact; rounding a
/// half-integer up is the same as adding the half unit back. Cell-center shapes stay on
/// the integer grid, where nearest-integer rounding is the identity.
pub fn rotate_cell(cell: Point, pivot: PivotPolicy, direction: RotationDirection) -> Point {
    let d = direction.sign();
    let [m0, m1, m2, m3] = ROTATION_MATRIX;

    match pivot {
        PivotPolicy::CellCenter => Point::new(
            (cell.x * m0 + cell.y * m1) * d,
            (cell.x * m2 + cell.y * m3) * d,
        ),
        PivotPolicy::CellCorner => {
            let x2 = 2 * cell.x - 1;
            let y2 = 2 * cell.y - 1;
            Point::new(
                ceil_half((x2 * m0 + y2 * m1) * d),
                ceil_half((x2 * m2 + y2 * m3) * d),
            )
        }
    }
}

/// Rotate every cell in place
pub fn apply_rotation_matrix(
    cells: &mut ShapeCells,
    pivot: PivotPolicy,
    direction: RotationDirection,
) {
    for cell in cells.iter_mut() {
        *cell = rotate_cell(*cell, pivot, direction);
    }
}

/// Kick-table row for a rotation leaving `rotation_index` in `direction`.
///
/// Clockwise from state `r` uses row `2r`, counter-clockwise uses row `2r - 1`, wrapped
/// into the table.
pub fn wall_kick_index(rotation_index: u8, direction: RotationDirection, rows: usize) -> usize {
    let mut index = rotation_index as i32 * 2;
    if direction.sign() < 0 {
        index -= 1;
    }
    wrap(index, 0, rows as i32) as usize
}

/// Rotate `piece` by 90° in `direction`, trying each wall kick in order.
///
/// On success the piece holds the rotated cells and the new rotation index, translated by
/// the first kick offset that fit. On failure the piece is left exactly as it was.
pub fn rotate(piece: &mut Piece<'_>, board: &Board, direction: RotationDirection) -> bool {
    if piece.is_locked() {
        return false;
    }

    let definition = piece.definition;
    let original_rotation = piece.rotation_index;
    let original_cells = piece.cells;

    piece.rotation_index = wrap(
        original_rotation as i32 + direction.sign(),
        0,
        ROTATION_STATES as i32,
    ) as u8;
    apply_rotation_matrix(&mut piece.cells, definition.pivot, direction);

    let row = wall_kick_index(original_rotation, direction, definition.kick_rows());
    for (attempt, &offset) in definition.kick_row(row).iter().enumerate() {
        if piece.try_move(board, offset) {
            trace!(
                shape = ?definition.kind,
                from = original_rotation,
                to = piece.rotation_index,
                attempt,
                dx = offset.x,
                dy = offset.y,
                "rotation accepted"
            );
            return true;
        }
    }

    trace!(shape = ?definition.kind, from = original_rotation, ?direction, "rotation rejected");
    piece.rotation_index = original_rotation;
    piece.cells = original_cells;
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::{Bounds, ShapeKind};

    use RotationDirection::{Clockwise, CounterClockwise};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn kick_rows_follow_the_source_orientation() {
        assert_eq!(wall_kick_index(0, Clockwise, 8), 0);
        assert_eq!(wall_kick_index(0, CounterClockwise, 8), 7);
        assert_eq!(wall_kick_index(1, CounterClockwise, 8), 1);
        assert_eq!(wall_kick_index(1, Clockwise, 8), 2);
        assert_eq!(wall_kick_index(3, Clockwise, 8), 6);
        assert_eq!(wall_kick_index(3, CounterClockwise, 8), 5);
    }

    #[test]
    fn t_rotates_clockwise_to_point_right() {
        let mut cells = [p(0, 1), p(-1, 0), p(0, 0), p(1, 0)];
        apply_rotation_matrix(&mut cells, PivotPolicy::CellCenter, Clockwise);
        assert_eq!(cells, [p(1, 0), p(0, 1), p(0, 0), p(0, -1)]);
    }

    #[test]
    fn i_rotates_into_the_right_column() {
        let mut cells = [p(-1, 1), p(0, 1), p(1, 1), p(2, 1)];
        apply_rotation_matrix(&mut cells, PivotPolicy::CellCorner, Clockwise);
        assert_eq!(cells, [p(1, 2), p(1, 1), p(1, 0), p(1, -1)]);
    }

    #[test]
    fn o_keeps_its_footprint() {
        let mut cells = [p(0, 1), p(1, 1), p(0, 0), p(1, 0)];
        let mut sorted_before = cells;
        sorted_before.sort();
        apply_rotation_matrix(&mut cells, PivotPolicy::CellCorner, CounterClockwise);
        cells.sort();
        assert_eq!(cells, sorted_before);
    }

    #[test]
    fn four_turns_return_to_the_start() {
        for kind in ShapeKind::ALL {
            let catalog = Catalog::standard();
            let def = catalog.get(kind);
            let mut cells = def.cells;
            for _ in 0..4 {
                apply_rotation_matrix(&mut cells, def.pivot, Clockwise);
            }
            assert_eq!(cells, def.cells, "{:?}", kind);
        }
    }

    #[test]
    fn wall_kick_moves_piece_off_the_wall() {
        let catalog = Catalog::standard();
        let board = Board::new(Bounds::new(Point::ZERO, 10, 20));
        // Vertical I hugging the left wall: rotating back to horizontal needs a kick.
        let mut piece = Piece::new(catalog.get(ShapeKind::I), p(1, 10));
        assert!(rotate(&mut piece, &board, Clockwise));
        assert_eq!(piece.rotation_index, 1);
        assert_eq!(piece.absolute_cells()[0].x, 2);

        assert!(piece.try_move(&board, p(-2, 0)));
        assert_eq!(piece.absolute_cells()[0].x, 0);

        assert!(rotate(&mut piece, &board, CounterClockwise));
        assert_eq!(piece.rotation_index, 0);
        assert!(piece.absolute_cells().iter().all(|c| c.x >= 0));
        assert_ne!(piece.position(), p(-1, 10));
    }

    #[test]
    fn locked_piece_does_not_rotate() {
        let catalog = Catalog::standard();
        let board = Board::new(Bounds::new(Point::ZERO, 4, 4));
        let mut piece = Piece::new(catalog.get(ShapeKind::T), p(1, 0));
        piece.hard_drop(&board);
        assert!(!rotate(&mut piece, &board, Clockwise));
        assert_eq!(piece.rotation_index, 0);
    }
}
