//! Piece module - the active tetromino and its gravity/lock timers
//!
//! A piece keeps its own working copy of the shape cells (rotation mutates them in place),
//! its anchor on the board, and the timers that decide when it falls and when it locks.
//! The host clock is never read here; elapsed time is fed in through [`Piece::tick`].

use crate::board::Board;
use crate::catalog::{ShapeCells, TetrominoDefinition};
use crate::rotation;
use crate::types::{Point, RotationDirection, ShapeKind, Timing};

/// Lifecycle of a single piece instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceState {
    /// Can still move and rotate
    Active,
    /// Terminal; the owner commits it to the board and spawns the next piece
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece<'c> {
    pub(crate) definition: &'c TetrominoDefinition,
    pub(crate) cells: ShapeCells,
    pub(crate) position: Point,
    pub(crate) rotation_index: u8,
    /// Time since spawn
    clock_ms: u32,
    /// Clock value at which the next gravity step fires; scheduled on the first tick
    step_deadline_ms: Option<u32>,
    lock_ms: u32,
    state: PieceState,
}

impl<'c> Piece<'c> {
    /// New piece in rotation state 0 with its anchor at `position`
    pub fn new(definition: &'c TetrominoDefinition, position: Point) -> Self {
        Self {
            definition,
            cells: definition.cells,
            position,
            rotation_index: 0,
            clock_ms: 0,
            step_deadline_ms: None,
            lock_ms: 0,
            state: PieceState::Active,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.definition.kind
    }

    /// Current cell offsets relative to the anchor
    pub fn cells(&self) -> &ShapeCells {
        &self.cells
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation_index(&self) -> u8 {
        self.rotation_index
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == PieceState::Locked
    }

    pub fn lock_ms(&self) -> u32 {
        self.lock_ms
    }

    pub fn step_deadline_ms(&self) -> Option<u32> {
        self.step_deadline_ms
    }

    /// Board cells covered at the current anchor
    pub fn absolute_cells(&self) -> ShapeCells {
        self.cells_at(self.position)
    }

    /// Board cells the piece would cover with its anchor at `position`
    pub fn cells_at(&self, position: Point) -> ShapeCells {
        self.cells.map(|cell| position + cell)
    }

    /// Translate the anchor if the board allows it. A successful move resets the lock timer.
    pub fn try_move(&mut self, board: &Board, translation: Point) -> bool {
        if self.is_locked() {
            return false;
        }

        let candidate = self.position + translation;
        if !board.is_valid_position(self, candidate) {
            return false;
        }

        self.position = candidate;
        self.lock_ms = 0;
        true
    }

    /// Rotate with wall kicks; see [`rotation::rotate`]
    pub fn rotate(&mut self, board: &Board, direction: RotationDirection) -> bool {
        rotation::rotate(self, board, direction)
    }

    /// One gravity step: schedule the next deadline, try to fall one row, and lock if the
    /// lock timer has run out.
    pub fn step(&mut self, board: &Board, timing: Timing) -> PieceState {
        if self.is_locked() {
            return self.state;
        }

        self.step_deadline_ms = Some(self.clock_ms.saturating_add(timing.step_delay_ms));
        self.try_move(board, Point::DOWN);

        if self.lock_ms >= timing.lock_delay_ms {
            self.state = PieceState::Locked;
        }

        self.state
    }

    /// Advance the piece clock by `elapsed_ms`. Runs at most one gravity step per call.
    pub fn tick(&mut self, board: &Board, elapsed_ms: u32, timing: Timing) -> PieceState {
        if self.is_locked() {
            return self.state;
        }

        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        self.lock_ms = self.lock_ms.saturating_add(elapsed_ms);

        let deadline = *self.step_deadline_ms.get_or_insert(timing.step_delay_ms);
        if self.clock_ms >= deadline {
            self.step(board, timing)
        } else {
            self.state
        }
    }

    /// Fall until blocked, then lock immediately. Returns the number of rows fallen.
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        if self.is_locked() {
            return 0;
        }

        let mut rows = 0;
        while self.try_move(board, Point::DOWN) {
            rows += 1;
        }
        self.state = PieceState::Locked;
        rows
    }
}
