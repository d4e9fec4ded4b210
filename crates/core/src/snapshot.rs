//! Snapshot of everything a host needs to draw or inspect a session after a call.

use serde::{Deserialize, Serialize};

use crate::catalog::ShapeCells;
use crate::piece::Piece;
use crate::types::{Point, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub shape: ShapeKind,
    pub position: Point,
    pub rotation_index: u8,
    /// Absolute board cells
    pub cells: ShapeCells,
}

impl From<&Piece<'_>> for ActiveSnapshot {
    fn from(piece: &Piece<'_>) -> Self {
        Self {
            shape: piece.kind(),
            position: piece.position(),
            rotation_index: piece.rotation_index(),
            cells: piece.absolute_cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub width: u32,
    pub height: u32,
    /// Board cell of `rows[0][0]`
    pub origin: Point,
    /// Bottom row first; 0 is empty, otherwise the shape code
    pub rows: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<ShapeCells>,
    pub game_over: bool,
    /// Rows cleared by the most recent host call
    pub rows_cleared: u32,
    pub total_rows_cleared: u32,
    pub pieces_locked: u32,
    pub episode_id: u32,
}

impl SessionSnapshot {
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&c| c != 0).count())
            .sum()
    }

    /// Occupancy code at a board cell, `None` if out of bounds
    pub fn cell(&self, p: Point) -> Option<u8> {
        let x = usize::try_from(p.x - self.origin.x).ok()?;
        let y = usize::try_from(p.y - self.origin.y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }
}
