//! Catalog module - tetromino shape definitions and wall-kick tables
//!
//! Cells are listed for rotation state 0 relative to the piece anchor, with y pointing up.
//! Wall-kick tables follow SRS. Reference: https://tetris.wiki/SRS

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::types::{Point, ShapeKind, PIECE_CELLS, WALL_KICK_TRANSITIONS};

/// Cell offsets of a shape relative to its anchor
pub type ShapeCells = [Point; PIECE_CELLS];

/// Built-in wall-kick table: one row of 5 candidate offsets per rotation transition
pub type KickTable = [[Point; 5]; WALL_KICK_TRANSITIONS];

/// Where a shape rotates around, which decides how rotated coordinates are rounded.
///
/// - **CellCenter**: pivot sits on a cell center (J, L, S, T, Z); rotated coordinates are
///   already integers and round to nearest
/// - **CellCorner**: pivot sits on a cell corner (I, O, the even-width shapes); cells are
///   shifted by half a unit, rotated, and rounded up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PivotPolicy {
    CellCenter,
    CellCorner,
}

/// Immutable definition of one shape, shared by every piece of that shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TetrominoDefinition {
    pub kind: ShapeKind,
    pub cells: ShapeCells,
    /// Indexed by transition row, then by attempt
    pub wall_kicks: Vec<Vec<Point>>,
    pub pivot: PivotPolicy,
}

impl TetrominoDefinition {
    /// Build the standard definition of `kind` by table lookup
    pub fn initialize(kind: ShapeKind) -> Self {
        Self {
            kind,
            cells: shape_cells(kind),
            wall_kicks: kick_table(kind).iter().map(|row| row.to_vec()).collect(),
            pivot: pivot_policy(kind),
        }
    }

    /// Candidate offsets for one transition row
    pub fn kick_row(&self, row: usize) -> &[Point] {
        &self.wall_kicks[row]
    }

    pub fn kick_rows(&self) -> usize {
        self.wall_kicks.len()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.wall_kicks.len() != WALL_KICK_TRANSITIONS {
            return Err(CatalogError::KickTransitionCount {
                shape: self.kind,
                expected: WALL_KICK_TRANSITIONS,
                found: self.wall_kicks.len(),
            });
        }
        if let Some(row) = self.wall_kicks.iter().position(|row| row.is_empty()) {
            return Err(CatalogError::EmptyKickRow {
                shape: self.kind,
                row,
            });
        }
        Ok(())
    }
}

/// All seven definitions, built once and shared read-only by every piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Indexed by [`ShapeKind::index`]
    definitions: Vec<TetrominoDefinition>,
}

impl Catalog {
    /// The standard seven shapes with SRS wall kicks
    pub fn standard() -> Self {
        Self {
            definitions: ShapeKind::ALL
                .iter()
                .map(|&kind| TetrominoDefinition::initialize(kind))
                .collect(),
        }
    }

    /// Build a catalog from custom definitions.
    ///
    /// Every shape must appear exactly once and every wall-kick table must have one
    /// non-empty row per rotation transition.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = TetrominoDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut slots: Vec<Option<TetrominoDefinition>> = vec![None; ShapeKind::ALL.len()];

        for definition in definitions {
            definition.validate()?;
            let slot = &mut slots[definition.kind.index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateShape(definition.kind));
            }
            *slot = Some(definition);
        }

        let mut ordered = Vec::with_capacity(slots.len());
        for (kind, slot) in ShapeKind::ALL.into_iter().zip(slots) {
            ordered.push(slot.ok_or(CatalogError::MissingShape(kind))?);
        }

        debug!(shapes = ordered.len(), "catalog initialized");
        Ok(Self {
            definitions: ordered,
        })
    }

    pub fn get(&self, kind: ShapeKind) -> &TetrominoDefinition {
        &self.definitions[kind.index()]
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TetrominoDefinition> {
        self.definitions.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

const fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Rotation-0 cells for a shape
pub fn shape_cells(kind: ShapeKind) -> ShapeCells {
    match kind {
        // ####
        ShapeKind::I => [p(-1, 1), p(0, 1), p(1, 1), p(2, 1)],
        ShapeKind::J => [p(-1, 1), p(-1, 0), p(0, 0), p(1, 0)],
        ShapeKind::L => [p(1, 1), p(-1, 0), p(0, 0), p(1, 0)],
        ShapeKind::O => [p(0, 1), p(1, 1), p(0, 0), p(1, 0)],
        ShapeKind::S => [p(0, 1), p(1, 1), p(-1, 0), p(0, 0)],
        ShapeKind::T => [p(0, 1), p(-1, 0), p(0, 0), p(1, 0)],
        ShapeKind::Z => [p(-1, 1), p(0, 1), p(0, 0), p(1, 0)],
    }
}

/// I and O rotate around a cell corner, the rest around a cell center
pub fn pivot_policy(kind: ShapeKind) -> PivotPolicy {
    match kind {
        ShapeKind::I | ShapeKind::O => PivotPolicy::CellCorner,
        _ => PivotPolicy::CellCenter,
    }
}

/// Kick table for a shape. O shares the J/L/S/T/Z table; its first candidate always fits.
pub fn kick_table(kind: ShapeKind) -> &'static KickTable {
    match kind {
        ShapeKind::I => &I_KICKS,
        _ => &JLOSTZ_KICKS,
    }
}

/// I piece kick table
const I_KICKS: KickTable = [
    // 0->1
    [p(0, 0), p(-2, 0), p(1, 0), p(-2, -1), p(1, 2)],
    // 1->0
    [p(0, 0), p(2, 0), p(-1, 0), p(2, 1), p(-1, -2)],
    // 1->2
    [p(0, 0), p(-1, 0), p(2, 0), p(-1, 2), p(2, -1)],
    // 2->1
    [p(0, 0), p(1, 0), p(-2, 0), p(1, -2), p(-2, 1)],
    // 2->3
    [p(0, 0), p(2, 0), p(-1, 0), p(2, 1), p(-1, -2)],
    // 3->2
    [p(0, 0), p(-2, 0), p(1, 0), p(-2, -1), p(1, 2)],
    // 3->0
    [p(0, 0), p(1, 0), p(-2, 0), p(1, -2), p(-2, 1)],
    // 0->3
    [p(0, 0), p(-1, 0), p(2, 0), p(-1, 2), p(2, -1)],
];

/// Kick table shared by J, L, O, S, T, Z
const JLOSTZ_KICKS: KickTable = [
    // 0->1
    [p(0, 0), p(-1, 0), p(-1, 1), p(0, -2), p(-1, -2)],
    // 1->0
    [p(0, 0), p(1, 0), p(1, -1), p(0, 2), p(1, 2)],
    // 1->2
    [p(0, 0), p(1, 0), p(1, -1), p(0, 2), p(1, 2)],
    // 2->1
    [p(0, 0), p(-1, 0), p(-1, 1), p(0, -2), p(-1, -2)],
    // 2->3
    [p(0, 0), p(1, 0), p(1, 1), p(0, -2), p(1, -2)],
    // 3->2
    [p(0, 0), p(-1, 0), p(-1, -1), p(0, 2), p(-1, 2)],
    // 3->0
    [p(0, 0), p(-1, 0), p(-1, -1), p(0, 2), p(-1, 2)],
    // 0->3
    [p(0, 0), p(1, 0), p(1, 1), p(0, -2), p(1, -2)],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_ordered_by_kind() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 7);
        for kind in ShapeKind::ALL {
            assert_eq!(catalog.get(kind).kind, kind);
        }
    }

    #[test]
    fn every_kick_row_starts_with_identity() {
        for kind in ShapeKind::ALL {
            for row in kick_table(kind) {
                assert_eq!(row[0], Point::ZERO, "{:?}", kind);
            }
        }
    }

    #[test]
    fn duplicate_shape_is_rejected() {
        let mut defs: Vec<_> = ShapeKind::ALL
            .iter()
            .map(|&k| TetrominoDefinition::initialize(k))
            .collect();
        defs.push(TetrominoDefinition::initialize(ShapeKind::T));
        assert_eq!(
            Catalog::from_definitions(defs),
            Err(CatalogError::DuplicateShape(ShapeKind::T))
        );
    }

    #[test]
    fn empty_kick_row_is_rejected() {
        let mut bad = TetrominoDefinition::initialize(ShapeKind::S);
        bad.wall_kicks[3].clear();
        assert_eq!(
            bad.validate(),
            Err(CatalogError::EmptyKickRow {
                shape: ShapeKind::S,
                row: 3
            })
        );
    }
}
