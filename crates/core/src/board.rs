//! Board module - committed cell occupancy, collision and line clearing
//!
//! The board owns only the cells of pieces that have already locked. The active piece is
//! never stored here while it moves, so every collision test runs against committed cells
//! only. Pieces are passed in explicitly; the board keeps no reference to them.
//!
//! Storage is a flat vector in row-major order starting from the bottom row, so row `y`
//! lives at `(y - y_min) * width`. Rows grow upward and gravity pulls toward `y_min`.

use tracing::debug;

use crate::catalog::{ShapeCells, TetrominoDefinition};
use crate::piece::Piece;
use crate::types::{Bounds, Cell, Point, ShapeKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board covering `bounds`
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![None; bounds.area()],
        }
    }

    #[inline(always)]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.x_min()) as usize;
        let y = (p.y - self.bounds.y_min()) as usize;
        Some(y * self.bounds.width() as usize + x)
    }

    #[inline(always)]
    fn row_range(&self, y: i32) -> Option<std::ops::Range<usize>> {
        if y < self.bounds.y_min() || y >= self.bounds.y_max() {
            return None;
        }
        let width = self.bounds.width() as usize;
        let start = (y - self.bounds.y_min()) as usize * width;
        Some(start..start + width)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Get the cell at `p`; `None` if out of bounds
    pub fn get(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|idx| self.cells[idx])
    }

    /// Set the cell at `p`; returns false if out of bounds
    pub fn set(&mut self, p: Point, cell: Cell) -> bool {
        match self.index(p) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Inside the bounds and empty
    pub fn is_free(&self, p: Point) -> bool {
        matches!(self.get(p), Some(None))
    }

    /// Inside the bounds and filled
    pub fn is_occupied(&self, p: Point) -> bool {
        matches!(self.get(p), Some(Some(_)))
    }

    /// Collision predicate for a set of relative cells anchored at `position`.
    ///
    /// Fails if any absolute cell is outside the bounds or already occupied.
    pub fn fits(&self, cells: &[Point], position: Point) -> bool {
        cells.iter().all(|&cell| self.is_free(position + cell))
    }

    /// Would `piece`, with its current cells, fit with its anchor at `candidate`?
    pub fn is_valid_position(&self, piece: &Piece<'_>, candidate: Point) -> bool {
        self.fits(piece.cells(), candidate)
    }

    /// Write the piece's cells into the occupancy and return the absolute cells written
    pub fn commit(&mut self, piece: &Piece<'_>) -> ShapeCells {
        let absolute = piece.absolute_cells();
        let kind = piece.kind();
        for &p in &absolute {
            self.set(p, Some(kind));
        }
        absolute
    }

    /// Inverse of [`Board::commit`]: empty the piece's cells and return them
    pub fn release(&mut self, piece: &Piece<'_>) -> ShapeCells {
        let absolute = piece.absolute_cells();
        for &p in &absolute {
            self.set(p, None);
        }
        absolute
    }

    /// Check if every column of row `y` is filled
    pub fn is_row_full(&self, y: i32) -> bool {
        match self.row_range(y) {
            Some(range) => self.cells[range].iter().all(|cell| cell.is_some()),
            None => false,
        }
    }

    /// Empty row `y` and shift every row above it down by one; the top row becomes empty
    pub fn clear_row(&mut self, y: i32) -> bool {
        let Some(range) = self.row_range(y) else {
            return false;
        };

        let width = self.bounds.width() as usize;
        let len = self.cells.len();

        // copy_within handles the overlapping ranges
        self.cells.copy_within(range.end..len, range.start);
        for cell in &mut self.cells[len - width..] {
            *cell = None;
        }

        true
    }

    /// Clear all full rows, scanning from the bottom up, and return how many were cleared.
    ///
    /// After a clear the same row index is tested again, since the row above has just
    /// shifted into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.bounds.y_min();

        while y < self.bounds.y_max() {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
                debug!(row = y, "row cleared");
            } else {
                y += 1;
            }
        }

        cleared
    }

    /// Build a piece of `definition` at `position`.
    ///
    /// Returns `None` when the spawn cells are blocked; the board is wiped in that case,
    /// which is the game-over transition.
    pub fn spawn<'c>(
        &mut self,
        definition: &'c TetrominoDefinition,
        position: Point,
    ) -> Option<Piece<'c>> {
        let piece = Piece::new(definition, position);
        if self.is_valid_position(&piece, position) {
            Some(piece)
        } else {
            debug!(shape = ?definition.kind, x = position.x, y = position.y, "spawn blocked");
            self.clear();
            None
        }
    }

    /// Lowest anchor the piece reaches by falling straight down from where it is
    pub fn drop_position(&self, piece: &Piece<'_>) -> Point {
        let mut position = piece.position();
        while self.is_valid_position(piece, position + Point::DOWN) {
            position += Point::DOWN;
        }
        position
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Iterate over filled cells, bottom row first
    pub fn occupied(&self) -> impl Iterator<Item = (Point, ShapeKind)> + '_ {
        let width = self.bounds.width() as usize;
        let min = self.bounds.min();
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|kind| {
                let p = Point::new(min.x + (idx % width) as i32, min.y + (idx / width) as i32);
                (p, kind)
            })
        })
    }

    /// Row `y` as a slice, left to right
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        self.row_range(y).map(|range| &self.cells[range])
    }

    /// Write the occupancy as one `u8` per cell (0 empty, shape code otherwise), bottom row first
    pub fn write_u8_rows(&self, out: &mut Vec<Vec<u8>>) {
        out.clear();
        for row in self.cells.chunks(self.bounds.width() as usize) {
            out.push(row.iter().map(|cell| cell.map_or(0, ShapeKind::code)).collect());
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a board from text rows, top row first: `.` is empty, a shape letter is filled.
    ///
    /// Rows shorter than the board width are padded with empty cells.
    pub fn from_rows(bounds: Bounds, rows: &[&str]) -> Self {
        let mut board = Self::new(bounds);
        for (i, line) in rows.iter().enumerate() {
            let y = bounds.y_min() + rows.len() as i32 - 1 - i as i32;
            for (j, ch) in line.chars().enumerate() {
                let kind = ShapeKind::from_str(&ch.to_string());
                board.set(Point::new(bounds.x_min() + j as i32, y), kind);
            }
        }
        board
    }
}
