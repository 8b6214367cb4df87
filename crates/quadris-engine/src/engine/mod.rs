//! Tick-driven simulation built on the [`core`](crate::core) data types.
//!
//! - [`GameSession`] - owns one playing session and advances it per frame
//! - [`GameField`] - locked cells, the active piece and the next piece
//! - [`GameStats`] - score and clear statistics
//! - [`PieceGenerator`] - seeded uniform piece spawner
//! - [`IntentSet`] - the player's requests for one frame
//! - [`Snapshot`] - render-ready view returned by every tick
//! - [`EngineConfig`] - board size, gravity, and scoring
//!
//! # Tick order
//!
//! Each call to [`GameSession::tick`] runs, in order:
//!
//! 1. gravity, once the accumulated time reaches the gravity interval
//! 2. the frame's intents, in [`Intent::ALL`] order, each reverted if it collides
//! 3. lock-in, if gravity found the piece blocked
//! 4. the loss check
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use quadris_engine::{EngineConfig, GameSession, IntentSet, PieceSeed};
//!
//! let seed: PieceSeed = "00000000000000000000000000000000".parse().unwrap();
//! let mut session = GameSession::with_seed(EngineConfig::default(), seed).unwrap();
//! let start = session.active_piece().position();
//!
//! session.tick(Duration::from_millis(270), &IntentSet::new());
//! assert_eq!(session.active_piece().position(), start.offset(0, 1));
//! ```

pub use self::{
    config::*, game_field::*, game_session::*, game_stats::*, intent::*, piece_generator::*,
    snapshot::*,
};

mod config;
mod game_field;
mod game_session;
mod game_stats;
mod intent;
mod piece_generator;
mod snapshot;
