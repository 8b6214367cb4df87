//! Falling-block puzzle engine.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - pure data: the shape catalog, board projection and pieces
//! - [`engine`] - the tick-driven simulation that owns a playing session
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use quadris_engine::{EngineConfig, GameSession, Intent, IntentSet};
//!
//! let mut session = GameSession::new(EngineConfig::default()).unwrap();
//!
//! let intents: IntentSet = [Intent::MoveLeft, Intent::Rotate].into_iter().collect();
//! let snapshot = session.tick(Duration::from_millis(16), &intents);
//!
//! assert_eq!(snapshot.score(), 0);
//! assert!(snapshot.state().is_falling());
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Returned when a piece would overlap a locked cell or leave the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting active piece")]
pub struct PieceCollisionError;
