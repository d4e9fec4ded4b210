//! Session module - one game driven by a host
//!
//! The session ties the board, the active piece, and the piece queue together and exposes
//! the host-facing operations: tick, move, rotate, hard drop, restart. The catalog is
//! borrowed, so a host builds it once and may run any number of sessions on it.
//!
//! Locking a piece always runs the same sequence: commit its cells, clear full rows, then
//! spawn the next shape at the spawn position. A blocked spawn ends the game and wipes the
//! board; after that every request is rejected until [`Session::restart`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::catalog::{Catalog, ShapeCells};
use crate::error::ConfigError;
use crate::piece::{Piece, PieceState};
use crate::rng::PieceQueue;
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::types::{
    Bounds, MoveDirection, Point, RotationDirection, SessionConfig, ShapeKind, Timing,
    MAX_BOARD_DIMENSION,
};

/// Headroom kept around the board so anchors plus cell and kick offsets never overflow `i32`
const COORDINATE_MARGIN: i32 = 4;

/// Check a config and return the board bounds it describes
pub fn validate_config(config: &SessionConfig) -> Result<Bounds, ConfigError> {
    let valid_dim = |d: u32| (1..=MAX_BOARD_DIMENSION).contains(&d);
    if !valid_dim(config.board_width) || !valid_dim(config.board_height) {
        return Err(ConfigError::InvalidDimensions {
            width: config.board_width,
            height: config.board_height,
            max: MAX_BOARD_DIMENSION,
        });
    }

    let origin = config.bounds().min();
    let in_range = |min: i32, extent: u32| {
        min.checked_sub(COORDINATE_MARGIN).is_some()
            && min
                .checked_add(extent as i32 + COORDINATE_MARGIN)
                .is_some()
    };
    if !in_range(origin.x, config.board_width) || !in_range(origin.y, config.board_height) {
        return Err(ConfigError::OriginOutOfRange(origin));
    }

    let bounds = config.bounds();
    if !bounds.contains(config.spawn_position) {
        return Err(ConfigError::SpawnOutOfBounds(config.spawn_position));
    }

    if config.step_delay_ms == 0 {
        return Err(ConfigError::ZeroStepDelay);
    }

    Ok(bounds)
}

/// Emitted every time a piece locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockEvent {
    pub shape: ShapeKind,
    /// Absolute cells written to the board, before any rows were cleared
    pub cells: ShapeCells,
    pub rows_cleared: u32,
    /// The spawn after this lock was blocked
    pub game_over: bool,
}

#[derive(Debug, Clone)]
pub struct Session<'c> {
    catalog: &'c Catalog,
    config: SessionConfig,
    timing: Timing,
    board: Board,
    active: Option<Piece<'c>>,
    queue: PieceQueue,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    started: bool,
    game_over: bool,
    /// Rows cleared by the current host call
    rows_cleared: u32,
    total_rows_cleared: u32,
    pieces_locked: u32,
    last_event: Option<LockEvent>,
}

impl<'c> Session<'c> {
    /// Validate `config` and create a session with an empty board and no active piece
    pub fn new(catalog: &'c Catalog, config: SessionConfig) -> Result<Self, ConfigError> {
        let bounds = validate_config(&config)?;

        Ok(Self {
            catalog,
            timing: config.timing(),
            board: Board::new(bounds),
            active: None,
            queue: PieceQueue::new(config.randomizer, config.seed),
            episode_id: 0,
            started: false,
            game_over: false,
            rows_cleared: 0,
            total_rows_cleared: 0,
            pieces_locked: 0,
            last_event: None,
            config,
        })
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece<'c>> {
        self.active.as_ref()
    }

    pub fn active_cells(&self) -> Option<ShapeCells> {
        self.active.as_ref().map(Piece::absolute_cells)
    }

    /// Shape the next spawn will use
    pub fn next_shape(&self) -> ShapeKind {
        self.queue.peek()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Rows cleared by the most recent host call
    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn total_rows_cleared(&self) -> u32 {
        self.total_rows_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Where the active piece would land if hard-dropped now
    pub fn ghost_position(&self) -> Option<Point> {
        self.active
            .as_ref()
            .map(|piece| self.board.drop_position(piece))
    }

    pub fn ghost_cells(&self) -> Option<ShapeCells> {
        let piece = self.active.as_ref()?;
        Some(piece.cells_at(self.board.drop_position(piece)))
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    fn begin_call(&mut self) {
        self.rows_cleared = 0;
    }

    /// Spawn the next shape from the queue. Returns false (and ends the game) if blocked.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.queue.draw();
        let definition = self.catalog.get(kind);

        match self.board.spawn(definition, self.config.spawn_position) {
            Some(piece) => {
                debug!(shape = ?kind, "piece spawned");
                self.active = Some(piece);
                true
            }
            None => {
                debug!(
                    shape = ?kind,
                    pieces_locked = self.pieces_locked,
                    rows = self.total_rows_cleared,
                    "game over"
                );
                self.active = None;
                self.game_over = true;
                false
            }
        }
    }

    /// Commit the active piece, clear full rows, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let cells = self.board.commit(&piece);
        let rows = self.board.clear_full_rows() as u32;

        self.rows_cleared += rows;
        self.total_rows_cleared += rows;
        self.pieces_locked += 1;
        debug!(shape = ?piece.kind(), rows_cleared = rows, "piece locked");

        let spawned = self.spawn_piece();
        self.last_event = Some(LockEvent {
            shape: piece.kind(),
            cells,
            rows_cleared: rows,
            game_over: !spawned,
        });
    }

    /// Feed elapsed host time into the active piece.
    ///
    /// Returns true if the piece fell or locked during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.begin_call();
        if !self.playable() {
            return false;
        }

        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let before = piece.position();
        match piece.tick(&self.board, elapsed_ms, self.timing) {
            PieceState::Locked => {
                self.lock_piece();
                true
            }
            PieceState::Active => piece.position() != before,
        }
    }

    pub fn request_move(&mut self, direction: MoveDirection) -> bool {
        self.begin_call();
        if !self.playable() {
            return false;
        }

        match self.active.as_mut() {
            Some(piece) => piece.try_move(&self.board, direction.translation()),
            None => false,
        }
    }

    pub fn request_rotate(&mut self, direction: RotationDirection) -> bool {
        self.begin_call();
        if !self.playable() {
            return false;
        }

        match self.active.as_mut() {
            Some(piece) => piece.rotate(&self.board, direction),
            None => false,
        }
    }

    /// Drop the active piece to the floor and lock it immediately
    pub fn request_hard_drop(&mut self) -> bool {
        self.begin_call();
        if !self.playable() {
            return false;
        }

        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let rows = piece.hard_drop(&self.board);
        debug!(shape = ?piece.kind(), rows, "hard drop");
        self.lock_piece();
        true
    }

    /// Wipe the board and start a new episode with the same config.
    ///
    /// The queue is reseeded from its current state so the new game continues the sequence
    /// instead of replaying it.
    pub fn restart(&mut self) {
        let seed = self.queue.seed();
        self.queue = PieceQueue::new(self.config.randomizer, seed);
        self.board.clear();
        self.active = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.started = false;
        self.game_over = false;
        self.rows_cleared = 0;
        self.total_rows_cleared = 0;
        self.pieces_locked = 0;
        self.last_event = None;
        debug!(episode = self.episode_id, "session restarted");
        self.start();
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        let bounds = self.board.bounds();
        out.width = bounds.width();
        out.height = bounds.height();
        out.origin = bounds.min();
        self.board.write_u8_rows(&mut out.rows);
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.ghost = self.ghost_cells();
        out.game_over = self.game_over;
        out.rows_cleared = self.rows_cleared;
        out.total_rows_cleared = self.total_rows_cleared;
        out.pieces_locked = self.pieces_locked;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
