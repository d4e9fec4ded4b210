//! Rotation and wall-kick tests

use tetromino_rules::core::rotation::{rotate_cell, wall_kick_index};
use tetromino_rules::core::{Board, Catalog, Piece, PivotPolicy};
use tetromino_rules::types::{Bounds, Point, RotationDirection, ShapeKind};

use RotationDirection::{Clockwise, CounterClockwise};

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

fn open_board() -> Board {
    Board::new(Bounds::new(Point::ZERO, 10, 20))
}

#[test]
fn rotate_then_counter_rotate_restores_every_shape() {
    let catalog = Catalog::standard();
    let board = open_board();

    for kind in ShapeKind::ALL {
        for direction in [Clockwise, CounterClockwise] {
            let mut piece = Piece::new(catalog.get(kind), p(4, 10));
            let before = piece.clone();

            assert!(piece.rotate(&board, direction));
            // Open board: the identity kick always applies
            assert_eq!(piece.position(), before.position());
            assert!(piece.rotate(&board, direction.reversed()));

            assert_eq!(piece.cells(), before.cells(), "{:?} {:?}", kind, direction);
            assert_eq!(piece.rotation_index(), 0);
        }
    }
}

#[test]
fn rotation_index_wraps_both_ways() {
    let catalog = Catalog::standard();
    let board = open_board();
    let mut piece = Piece::new(catalog.get(ShapeKind::L), p(4, 10));

    assert!(piece.rotate(&board, CounterClockwise));
    assert_eq!(piece.rotation_index(), 3);
    for expected in [0, 1, 2, 3, 0] {
        assert!(piece.rotate(&board, Clockwise));
        assert_eq!(piece.rotation_index(), expected);
    }
}

#[test]
fn failed_rotation_reverts_everything() {
    let catalog = Catalog::standard();
    // Horizontal I sealed in a one-row tunnel: no vertical orientation fits anywhere.
    let board = Board::from_rows(
        Bounds::new(Point::ZERO, 6, 5),
        &["SSSSSS", "SSSSSS", "......", "SSSSSS", "SSSSSS"],
    );
    let mut piece = Piece::new(catalog.get(ShapeKind::I), p(1, 1));
    assert!(board.is_valid_position(&piece, piece.position()));

    for direction in [Clockwise, CounterClockwise] {
        let before = piece.clone();
        assert!(!piece.rotate(&board, direction));
        assert_eq!(piece.cells(), before.cells());
        assert_eq!(piece.rotation_index(), before.rotation_index());
        assert_eq!(piece.position(), before.position());
    }
}

#[test]
fn t_kicks_away_from_the_right_wall() {
    let catalog = Catalog::standard();
    let board = open_board();
    let mut piece = Piece::new(catalog.get(ShapeKind::T), p(4, 10));

    // Point the T left (state 3) and push it against the right wall.
    assert!(piece.rotate(&board, CounterClockwise));
    while piece.try_move(&board, Point::RIGHT) {}
    assert_eq!(piece.position(), p(9, 10));

    // 3 -> 0 needs x-1..=x+1; the first fitting candidate is (-1, 0).
    assert!(piece.rotate(&board, Clockwise));
    assert_eq!(piece.rotation_index(), 0);
    assert_eq!(piece.position(), p(8, 10));
}

#[test]
fn o_rotation_never_moves_the_footprint() {
    let catalog = Catalog::standard();
    let board = open_board();
    let mut piece = Piece::new(catalog.get(ShapeKind::O), p(0, 0));

    let mut footprint = piece.absolute_cells();
    footprint.sort();
    for _ in 0..4 {
        assert!(piece.rotate(&board, Clockwise));
        let mut cells = piece.absolute_cells();
        cells.sort();
        assert_eq!(cells, footprint);
    }
}

#[test]
fn cell_corner_rounding_is_exact() {
    // Half-unit pivot: (x, y) -> (y, 1 - x) clockwise and back
    assert_eq!(rotate_cell(p(2, 1), PivotPolicy::CellCorner, Clockwise), p(1, -1));
    assert_eq!(rotate_cell(p(1, -1), PivotPolicy::CellCorner, CounterClockwise), p(2, 1));
    assert_eq!(rotate_cell(p(2, 1), PivotPolicy::CellCenter, Clockwise), p(1, -2));
}

#[test]
fn kick_index_covers_all_rows() {
    let mut rows: Vec<usize> = (0..4u8)
        .flat_map(|r| [Clockwise, CounterClockwise].map(|d| wall_kick_index(r, d, 8)))
        .collect();
    rows.sort();
    assert_eq!(rows, (0..8).collect::<Vec<_>>());
}
