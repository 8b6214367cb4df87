use serde::Serialize;

use crate::{Board, Color, GameStats, Piece, RotationMask, SessionState, ShapeKind};

/// Render-ready view of a session after a tick.
///
/// The board is the projection of the locked cells with the active piece overlaid.
/// Nothing in a snapshot refers back into the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    board: Board,
    next_piece: PiecePreview,
    stats: GameStats,
    state: SessionState,
}

impl Snapshot {
    pub(crate) fn new(
        board: Board,
        next_piece: PiecePreview,
        stats: GameStats,
        state: SessionState,
    ) -> Self {
        Self {
            board,
            next_piece,
            stats,
            state,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn next_piece(&self) -> &PiecePreview {
        &self.next_piece
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }
}

/// What a renderer needs to draw the on-deck piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PiecePreview {
    pub kind: ShapeKind,
    pub rotation: usize,
    pub color: Color,
    pub mask: RotationMask,
}

impl From<Piece> for PiecePreview {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.kind(),
            rotation: piece.rotation().index(),
            color: piece.color(),
            mask: piece.mask(),
        }
    }
}
