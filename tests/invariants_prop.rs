//! Property tests for board and session invariants.
//!
//! Covered:
//! - Commit followed by release restores the board exactly.
//! - A position with any cell outside the bounds is never valid.
//! - A rejected rotation leaves cells, anchor, and rotation index untouched.
//! - Random rollouts keep the active piece legal and the cell count consistent with locks
//!   and clears.

use proptest::prelude::*;
use tetromino_rules::core::{Board, Catalog, Piece, Session};
use tetromino_rules::types::{
    Bounds, MoveDirection, Point, RandomizerKind, RotationDirection, SessionConfig, ShapeKind,
};

const WIDTH: u32 = 10;
const HEIGHT: u32 = 20;

fn bounds() -> Bounds {
    Bounds::new(Point::ZERO, WIDTH, HEIGHT)
}

fn shape() -> impl Strategy<Value = ShapeKind> {
    prop::sample::select(ShapeKind::ALL.to_vec())
}

fn direction() -> impl Strategy<Value = RotationDirection> {
    prop_oneof![
        Just(RotationDirection::Clockwise),
        Just(RotationDirection::CounterClockwise),
    ]
}

/// Random committed cells; each cell is filled with probability `density`
fn scattered_board(density: f64) -> impl Strategy<Value = Board> {
    prop::collection::vec(prop::bool::weighted(density), (WIDTH * HEIGHT) as usize).prop_map(
        |filled| {
            let mut board = Board::new(bounds());
            for (i, on) in filled.into_iter().enumerate() {
                if on {
                    let p = Point::new(i as i32 % WIDTH as i32, i as i32 / WIDTH as i32);
                    board.set(p, Some(ShapeKind::Z));
                }
            }
            board
        },
    )
}

/// A piece of `kind` turned clockwise `turns` times, anchored at `target`
fn placed_piece<'c>(catalog: &'c Catalog, kind: ShapeKind, turns: usize, target: Point) -> Piece<'c> {
    let open = Board::new(Bounds::new(Point::new(-50, -50), 100, 100));
    let mut piece = Piece::new(catalog.get(kind), Point::ZERO);
    for _ in 0..turns {
        piece.rotate(&open, RotationDirection::Clockwise);
    }
    // try_move only tests the destination, so one jump relocates the anchor
    piece.try_move(&open, target - piece.position());
    piece
}

fn assert_active_is_legal(session: &Session<'_>) {
    let Some(piece) = session.active() else {
        return;
    };
    let board = session.board();
    for cell in piece.absolute_cells() {
        assert!(board.bounds().contains(cell), "{:?} out of bounds", cell);
        assert!(board.is_free(cell), "{:?} overlaps the stack", cell);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 4096, ..ProptestConfig::default() })]

    #[test]
    fn commit_then_release_is_identity(
        kind in shape(),
        turns in 0usize..4,
        x in 0i32..WIDTH as i32,
        y in 0i32..HEIGHT as i32,
        board in scattered_board(0.2),
    ) {
        let catalog = Catalog::standard();
        let target = Point::new(x, y);
        let piece = placed_piece(&catalog, kind, turns, target);
        prop_assume!(board.is_valid_position(&piece, target));

        let mut working = board.clone();
        let written = working.commit(&piece);
        for cell in written {
            prop_assert_eq!(working.get(cell), Some(Some(kind)));
        }
        working.release(&piece);
        prop_assert_eq!(working, board);
    }

    #[test]
    fn positions_leaving_the_bounds_are_invalid(
        kind in shape(),
        turns in 0usize..4,
        x in -6i32..16,
        y in -6i32..26,
    ) {
        let catalog = Catalog::standard();
        let board = Board::new(bounds());
        let target = Point::new(x, y);
        let piece = placed_piece(&catalog, kind, turns, target);

        let inside = piece.absolute_cells().iter().all(|&c| board.bounds().contains(c));
        prop_assert_eq!(board.is_valid_position(&piece, target), inside);
    }

    #[test]
    fn rotation_either_lands_legally_or_changes_nothing(
        kind in shape(),
        turns in 0usize..4,
        x in 0i32..WIDTH as i32,
        y in 0i32..HEIGHT as i32,
        dir in direction(),
        board in scattered_board(0.35),
    ) {
        let catalog = Catalog::standard();
        let target = Point::new(x, y);
        let mut piece = placed_piece(&catalog, kind, turns, target);
        prop_assume!(board.is_valid_position(&piece, target));

        let before = piece.clone();
        if piece.rotate(&board, dir) {
            let expected = (i32::from(before.rotation_index()) + dir.sign()).rem_euclid(4);
            prop_assert_eq!(i32::from(piece.rotation_index()), expected);
            prop_assert!(board.is_valid_position(&piece, piece.position()));
        } else {
            prop_assert_eq!(piece.cells(), before.cells());
            prop_assert_eq!(piece.position(), before.position());
            prop_assert_eq!(piece.rotation_index(), before.rotation_index());
        }
    }

    #[test]
    fn rollouts_keep_cell_accounting_consistent(
        seed in any::<u32>(),
        bag in any::<bool>(),
        actions in prop::collection::vec(0u8..7, 1..300),
    ) {
        let catalog = Catalog::standard();
        let config = SessionConfig {
            origin: Some(Point::ZERO),
            spawn_position: Point::new(4, 18),
            step_delay_ms: 100,
            lock_delay_ms: 50,
            randomizer: if bag { RandomizerKind::Bag } else { RandomizerKind::Uniform },
            seed,
            ..SessionConfig::default()
        };
        let mut session = Session::new(&catalog, config).unwrap();
        session.start();

        for action in actions {
            match action {
                0 => { session.request_move(MoveDirection::Left); }
                1 => { session.request_move(MoveDirection::Right); }
                2 => { session.request_move(MoveDirection::Down); }
                3 => { session.request_rotate(RotationDirection::Clockwise); }
                4 => { session.request_rotate(RotationDirection::CounterClockwise); }
                5 => { session.request_hard_drop(); }
                _ => { session.tick(40); }
            }

            if session.game_over() {
                prop_assert_eq!(session.board().occupied_count(), 0);
                prop_assert!(session.active().is_none());
                break;
            }

            assert_active_is_legal(&session);
            let placed = 4 * session.pieces_locked() as usize;
            let cleared = WIDTH as usize * session.total_rows_cleared() as usize;
            prop_assert_eq!(session.board().occupied_count(), placed - cleared);
            prop_assert!(session.rows_cleared() <= 4);
        }
    }
}
