//! Configuration errors surfaced before play begins.
//!
//! Gameplay itself has no error path: rejected moves and rotations are reported as `false`
//! and a blocked spawn is the game-over state. Only a malformed catalog or session config
//! is an error.

use thiserror::Error;

use crate::types::{Point, ShapeKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no definition for shape {0:?}")]
    MissingShape(ShapeKind),

    #[error("catalog defines shape {0:?} more than once")]
    DuplicateShape(ShapeKind),

    #[error("wall-kick table for {shape:?} has {found} transitions, expected {expected}")]
    KickTransitionCount {
        shape: ShapeKind,
        expected: usize,
        found: usize,
    },

    #[error("wall-kick row {row} for {shape:?} has no candidate offsets")]
    EmptyKickRow { shape: ShapeKind, row: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1 and at most {max}x{max}, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32, max: u32 },

    #[error("board origin ({}, {}) leaves no room for piece coordinates", .0.x, .0.y)]
    OriginOutOfRange(Point),

    #[error("spawn position ({}, {}) lies outside the board", .0.x, .0.y)]
    SpawnOutOfBounds(Point),

    #[error("step delay must be greater than zero")]
    ZeroStepDelay,
}
