//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the rules engine and by any host
//! that drives it. All types are plain data with no behaviour beyond small conversions,
//! so they can be shared freely between the engine, a renderer, or a remote controller.
//!
//! # Coordinate Convention
//!
//! Cells are addressed by `(x, y)` with **x increasing to the right and y increasing upward**.
//! Gravity pulls toward smaller `y`. The default board is centered on the origin:
//!
//! - **Width**: 10 columns (`x` in `-5..5`)
//! - **Height**: 20 rows (`y` in `-10..10`)
//! - **Spawn position**: `(-1, 8)`
//!
//! # Timing Defaults
//!
//! Timing values are in milliseconds and are fed in by the host clock:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STEP_DELAY_MS` | 1000 | Gravity interval (one row per second) |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//!
//! # Examples
//!
//! ```
//! use tetromino_rules_types::{Point, RotationDirection, ShapeKind, SessionConfig};
//!
//! let shape = ShapeKind::from_str("t").unwrap();
//! assert_eq!(shape, ShapeKind::T);
//!
//! assert_eq!(RotationDirection::Clockwise.sign(), 1);
//! assert_eq!(Point::new(1, 2) + Point::DOWN, Point::new(1, 1));
//!
//! let config = SessionConfig::default();
//! let bounds = config.bounds();
//! assert_eq!(bounds.x_min(), -5);
//! assert_eq!(bounds.y_max(), 10);
//! ```

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u32 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u32 = 20;

/// Largest accepted board dimension
pub const MAX_BOARD_DIMENSION: u32 = 1024;

/// Default spawn anchor on the centered 10x20 board
pub const SPAWN_POSITION: Point = Point::new(-1, 8);

/// Gravity interval in milliseconds
pub const STEP_DELAY_MS: u32 = 1000;

/// Lock delay in milliseconds
pub const LOCK_DELAY_MS: u32 = 500;

/// Default seed for the piece randomizer
pub const DEFAULT_SEED: u32 = 1;

/// Every tetromino has exactly four cells
pub const PIECE_CELLS: usize = 4;

/// Number of orientations a piece cycles through
pub const ROTATION_STATES: u8 = 4;

/// Rows in a wall-kick table (two transitions per orientation)
pub const WALL_KICK_TRANSITIONS: usize = 8;

/// Integer cell coordinate, or a translation between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point::new(0, 0);
    pub const LEFT: Point = Point::new(-1, 0);
    pub const RIGHT: Point = Point::new(1, 0);
    pub const DOWN: Point = Point::new(0, -1);
    pub const UP: Point = Point::new(0, 1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Half-open rectangle of valid cells: columns `x_min..x_max`, rows `y_min..y_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    min: Point,
    width: u32,
    height: u32,
}

impl Bounds {
    pub const fn new(min: Point, width: u32, height: u32) -> Self {
        Self { min, width, height }
    }

    /// Rectangle centered on the origin, with the half-cell rounded toward the bottom-left
    pub fn centered(width: u32, height: u32) -> Self {
        let min = Point::new(-((width / 2) as i32), -((height / 2) as i32));
        Self::new(min, width, height)
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn x_min(&self) -> i32 {
        self.min.x
    }

    /// One past the rightmost column
    pub fn x_max(&self) -> i32 {
        self.min.x + self.width as i32
    }

    pub fn y_min(&self) -> i32 {
        self.min.y
    }

    /// One past the top row
    pub fn y_max(&self) -> i32 {
        self.min.y + self.height as i32
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x_min() && p.x < self.x_max() && p.y >= self.y_min() && p.y < self.y_max()
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// The seven tetromino shapes, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Position in [`ShapeKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::O => 1,
            ShapeKind::T => 2,
            ShapeKind::J => 3,
            ShapeKind::L => 4,
            ShapeKind::S => 5,
            ShapeKind::Z => 6,
        }
    }

    /// Non-zero code used in compact board grids (0 means empty)
    pub fn code(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_rules_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("I"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("q"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }
}

/// Rotation direction requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// `+1` for clockwise, `-1` for counter-clockwise
    pub fn sign(self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Lateral or downward translation requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    pub fn translation(self) -> Point {
        match self {
            MoveDirection::Left => Point::LEFT,
            MoveDirection::Right => Point::RIGHT,
            MoveDirection::Down => Point::DOWN,
        }
    }
}

/// Gravity and lock-delay intervals, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timing {
    pub step_delay_ms: u32,
    pub lock_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            step_delay_ms: STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}

/// How the next shape is chosen on spawn.
///
/// - **Uniform**: every shape is equally likely on every spawn; repeats are allowed
/// - **Bag**: each run of 7 spawns contains every shape exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomizerKind {
    #[default]
    Uniform,
    Bag,
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(ShapeKind)`: Occupied, tagged with the shape that filled it
pub type Cell = Option<ShapeKind>;

/// Configuration recognized at session start.
///
/// Every field falls back to its default when missing from a serialized config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board_width: u32,
    pub board_height: u32,
    /// Bottom-left cell of the board; `None` centers the board on the origin
    pub origin: Option<Point>,
    pub spawn_position: Point,
    pub step_delay_ms: u32,
    pub lock_delay_ms: u32,
    pub randomizer: RandomizerKind,
    pub seed: u32,
}

impl SessionConfig {
    pub fn bounds(&self) -> Bounds {
        match self.origin {
            Some(min) => Bounds::new(min, self.board_width, self.board_height),
            None => Bounds::centered(self.board_width, self.board_height),
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            step_delay_ms: self.step_delay_ms,
            lock_delay_ms: self.lock_delay_ms,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            origin: None,
            spawn_position: SPAWN_POSITION,
            step_delay_ms: STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            randomizer: RandomizerKind::Uniform,
            seed: DEFAULT_SEED,
        }
    }
}
