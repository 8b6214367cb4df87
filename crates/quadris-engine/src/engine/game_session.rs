use std::time::Duration;

use serde::Serialize;

use crate::{
    PieceCollisionError,
    core::{board::LockedCells, piece::Piece},
};

use super::{
    ConfigError, EngineConfig, GameStats, Intent, IntentSet, PieceSeed, Snapshot,
    game_field::GameField, piece_generator::PieceGenerator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    /// The active piece is under gravity and player control.
    Falling,
    /// Gravity could not move the piece down; it locks at the end of the tick.
    Locking,
    Paused,
    GameOver,
}

/// A playing session driven one frame at a time by [`GameSession::tick`].
///
/// Gravity runs on accumulated virtual time: the caller reports how much time has
/// passed since the previous tick, and every full gravity interval moves the piece
/// down one row.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    field: GameField,
    stats: GameStats,
    state: SessionState,
    gravity_elapsed: Duration,
    play_time: Duration,
}

impl GameSession {
    /// Starts a session with a randomly seeded piece generator.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_generator(config, PieceGenerator::new())
    }

    /// Starts a session whose piece sequence is fixed by `seed`.
    pub fn with_seed(config: EngineConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        Self::with_generator(config, PieceGenerator::with_seed(seed))
    }

    fn with_generator(config: EngineConfig, generator: PieceGenerator) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = generator.spawn_column(config.spawn_column);
        Ok(Self {
            field: GameField::new(config.board_size(), generator),
            stats: GameStats::new(config.points_per_row),
            state: SessionState::Falling,
            gravity_elapsed: Duration::ZERO,
            play_time: Duration::ZERO,
            config,
        })
    }

    /// Replaces the locked cells, e.g. to start from a prepared board.
    #[must_use]
    pub fn with_locked_cells(self, locked: LockedCells) -> Self {
        Self {
            field: self.field.with_locked_cells(locked),
            ..self
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn active_piece(&self) -> Piece {
        self.field.active_piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> Piece {
        self.field.next_piece()
    }

    /// Returns the time spent playing, excluding pauses and the time after game over.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.play_time
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Falling | SessionState::Locking => SessionState::Paused,
            SessionState::Paused => SessionState::Falling,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Advances the session by `elapsed` and applies this frame's intents.
    ///
    /// The steps run in a fixed order: gravity, intents, lock-in, loss check.
    /// Rejected moves are silently dropped. Paused and finished sessions are left
    /// untouched.
    pub fn tick(&mut self, elapsed: Duration, intents: &IntentSet) -> Snapshot {
        if !self.state.is_falling() {
            return self.snapshot();
        }

        self.play_time += elapsed;
        self.apply_gravity(elapsed);
        for intent in intents.iter() {
            self.apply_intent(intent).ok();
        }
        if self.state.is_locking() {
            self.lock_active_piece();
        }
        if self.field.has_topped_out() {
            self.state = SessionState::GameOver;
        }

        self.snapshot()
    }

    /// Builds the render view: locked cells with the active piece overlaid.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut board = self.field.board();
        board.fill_piece(&self.field.active_piece());
        Snapshot::new(
            board,
            self.field.next_piece().into(),
            self.stats.clone(),
            self.state,
        )
    }

    pub fn apply_intent(&mut self, intent: Intent) -> Result<(), PieceCollisionError> {
        match intent {
            Intent::MoveLeft => self.try_move_left(),
            Intent::MoveRight => self.try_move_right(),
            Intent::SoftDrop => self.try_soft_drop(),
            Intent::Rotate => self.try_rotate(),
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.field.active_piece().left();
        self.field.set_active_piece(piece)
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.field.active_piece().right();
        self.field.set_active_piece(piece)
    }

    /// Moves the piece down one row. Never locks, even when blocked.
    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.field.active_piece().down();
        self.field.set_active_piece(piece)
    }

    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.field.active_piece().rotated();
        self.field.set_active_piece(piece)
    }

    fn apply_gravity(&mut self, elapsed: Duration) {
        self.gravity_elapsed += elapsed;
        if self.gravity_elapsed < self.config.gravity_interval {
            return;
        }
        self.gravity_elapsed = Duration::ZERO;

        let dropped = self.field.active_piece().down();
        if self.field.set_active_piece(dropped).is_err() && dropped.position().y > 0 {
            self.state = SessionState::Locking;
        }
    }

    fn lock_active_piece(&mut self) {
        let cleared_rows = self.field.lock_active_piece();
        self.stats.complete_piece_lock(cleared_rows);
        self.state = SessionState::Falling;
    }
}
