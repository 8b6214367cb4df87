use serde::{Deserialize, Serialize};

use super::{
    board::Board,
    position::Position,
    shape::{Color, RotationMask, ShapeKind},
};

/// Default anchor column of a freshly spawned piece.
pub const DEFAULT_SPAWN_COLUMN: u16 = 5;

/// Offset from a mask cell `(column, row)` to board coordinates relative to the anchor.
///
/// Mask column 2 lines up with the anchor column, and the bottom mask row sits just
/// above the anchor row, so a piece anchored on row 0 is entirely hidden.
const MASK_OFFSET_X: i32 = -2;
const MASK_OFFSET_Y: i32 = -4;

/// A falling piece with position, rotation, and kind.
///
/// Pieces are values: movement and rotation return new `Piece` instances, which
/// makes reverting a rejected move a matter of keeping the old one.
///
/// # Example
///
/// ```
/// use quadris_engine::{Piece, Position, ShapeKind};
///
/// let piece = Piece::spawn(ShapeKind::O, 5);
/// let moved = piece.left().down();
/// assert_eq!(moved.position(), Position::new(4, 1));
/// assert_eq!(moved.occupied_cells().count(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    kind: ShapeKind,
    position: Position,
    rotation: PieceRotation,
}

impl Piece {
    /// Creates a piece at the default spawn anchor with rotation 0.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self::spawn(kind, i32::from(DEFAULT_SPAWN_COLUMN))
    }

    /// Creates a piece anchored at `(column, 0)` with rotation 0.
    ///
    /// Every mask cell lies above row 0 at that anchor.
    #[must_use]
    pub fn spawn(kind: ShapeKind, column: i32) -> Self {
        Self {
            kind,
            position: Position::new(column, 0),
            rotation: PieceRotation::default(),
        }
    }

    #[must_use]
    pub fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Sets the rotation index, reduced modulo the kind's rotation count.
    #[must_use]
    pub fn with_rotation(self, rotation: usize) -> Self {
        Self {
            rotation: PieceRotation::new(self.kind, rotation),
            ..self
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.kind.color()
    }

    #[must_use]
    pub fn mask(&self) -> RotationMask {
        self.kind.rotation_mask(self.rotation.index())
    }

    /// Returns the absolute board coordinates covered by the piece.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.mask().occupied_cells().map(move |(column, row)| {
            self.position
                .offset(MASK_OFFSET_X, MASK_OFFSET_Y)
                .offset(mask_coord(column), mask_coord(row))
        })
    }

    /// Returns whether any occupied cell is not open on `board`.
    #[must_use]
    pub fn is_colliding(&self, board: &Board) -> bool {
        self.occupied_cells().any(|pos| !board.is_open(pos))
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.with_position(self.position.offset(-1, 0))
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.with_position(self.position.offset(1, 0))
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.with_position(self.position.offset(0, 1))
    }

    /// Advances to the next rotation state, wrapping to 0 after the last.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotated(self.kind),
            ..*self
        }
    }
}

fn mask_coord(v: usize) -> i32 {
    // mask coordinates are below `MASK_SIZE`
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Rotation state of a piece, always below its kind's rotation count.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn new(kind: ShapeKind, index: usize) -> Self {
        let index = index % kind.rotation_count();
        Self(u8::try_from(index).unwrap_or_default())
    }

    #[must_use]
    pub fn rotated(self, kind: ShapeKind) -> Self {
        Self::new(kind, self.index() + 1)
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}
