//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game: the grid, the active piece,
//! collision, rotation with wall kicks, locking, line clears, and game over. It has **no**
//! rendering, input, or clock dependencies, which makes it:
//!
//! - **Deterministic**: the same seed and the same sequence of calls produce the same game
//! - **Testable**: time is fed in as plain milliseconds, so tests drive it with synthetic ticks
//! - **Portable**: any host (terminal, GUI, headless bot) drives it through [`Session`]
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven shape definitions and their wall-kick tables
//! - [`piece`]: the active piece, its movement, and its gravity/lock timers
//! - [`board`]: committed occupancy, the collision predicate, and line clearing
//! - [`rotation`]: the 90° transform and the wall-kick resolver
//! - [`rng`]: seeded uniform and 7-bag shape selection
//! - [`session`]: the host-facing game loop (tick, move, rotate, drop, restart)
//! - [`snapshot`]: serializable view of a session after each call
//!
//! # Example
//!
//! ```
//! use tetromino_rules_core::{Catalog, Session};
//! use tetromino_rules_core::types::{MoveDirection, RotationDirection, SessionConfig};
//!
//! let catalog = Catalog::standard();
//! let mut session = Session::new(&catalog, SessionConfig::default()).unwrap();
//! session.start();
//!
//! session.request_move(MoveDirection::Left);
//! session.request_rotate(RotationDirection::Clockwise);
//! assert!(session.request_hard_drop());
//!
//! assert_eq!(session.pieces_locked(), 1);
//! assert!(!session.game_over());
//! ```
//!
//! # Timing
//!
//! The host calls [`Session::tick`] with the time elapsed since the previous tick. A piece
//! falls one row each time its step deadline passes, and locks on a gravity step once it
//! has gone `lock_delay_ms` without a successful move.

pub mod board;
pub mod catalog;
pub mod error;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod session;
pub mod snapshot;

pub use tetromino_rules_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{Catalog, PivotPolicy, ShapeCells, TetrominoDefinition};
pub use error::{CatalogError, ConfigError};
pub use piece::{Piece, PieceState};
pub use rng::{PieceQueue, SimpleRng};
pub use rotation::{rotate, wrap};
pub use session::{validate_config, LockEvent, Session};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
