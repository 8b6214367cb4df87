use std::mem;

use crate::{
    PieceCollisionError,
    core::{
        board::{Board, BoardSize, LockedCells},
        piece::Piece,
    },
};

use super::piece_generator::PieceGenerator;

/// Rows above this index end the game once anything is locked there.
const LOSS_ROW: i32 = 1;

/// Single-piece game state: locked cells, the active piece, and the next piece.
///
/// The field never stores a grid; [`GameField::board`] projects one from the
/// locked cells on demand, and the active piece is tested against that projection
/// only.
#[derive(Debug, Clone)]
pub struct GameField {
    size: BoardSize,
    locked: LockedCells,
    active_piece: Piece,
    next_piece: Piece,
    generator: PieceGenerator,
}

impl GameField {
    #[must_use]
    pub fn new(size: BoardSize, mut generator: PieceGenerator) -> Self {
        let active_piece = generator.spawn();
        let next_piece = generator.spawn();
        Self {
            size,
            locked: LockedCells::new(),
            active_piece,
            next_piece,
            generator,
        }
    }

    /// Replaces the locked cells, e.g. to start from a prepared board.
    #[must_use]
    pub fn with_locked_cells(self, locked: LockedCells) -> Self {
        Self { locked, ..self }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[must_use]
    pub fn locked_cells(&self) -> &LockedCells {
        &self.locked
    }

    /// Projects the locked cells into a full grid.
    #[must_use]
    pub fn board(&self) -> Board {
        Board::project(self.size, &self.locked)
    }

    #[must_use]
    pub fn active_piece(&self) -> Piece {
        self.active_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> Piece {
        self.next_piece
    }

    #[must_use]
    pub fn is_colliding(&self, piece: Piece) -> bool {
        piece.is_colliding(&self.board())
    }

    /// Replaces the active piece if it fits; otherwise leaves it untouched.
    pub fn set_active_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.is_colliding(piece) {
            return Err(PieceCollisionError);
        }
        self.active_piece = piece;
        Ok(())
    }

    /// Merges the active piece into the locked cells and promotes the next piece.
    ///
    /// A new next piece is spawned, then full rows are cleared. Returns the number
    /// of rows cleared.
    pub fn lock_active_piece(&mut self) -> usize {
        let color = self.active_piece.color();
        for pos in self.active_piece.occupied_cells() {
            self.locked.insert(pos, color);
        }
        self.active_piece = mem::replace(&mut self.next_piece, self.generator.spawn());
        self.locked.clear_full_rows(self.size)
    }

    /// Returns whether any locked cell lies above row 1.
    #[must_use]
    pub fn has_topped_out(&self) -> bool {
        self.locked.top_row().is_some_and(|y| y < LOSS_ROW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceSeed, Position, ShapeKind};

    fn field() -> GameField {
        let seed: PieceSeed = "00000000000000000000000000000001".parse().unwrap();
        GameField::new(BoardSize::new(10, 20), PieceGenerator::with_seed(seed))
    }

    #[test]
    fn test_new_field_is_empty() {
        let field = field();
        assert!(field.locked_cells().is_empty());
        assert!(field.board().rows().flatten().all(|c| c.is_empty()));
        assert_eq!(field.active_piece().position(), Position::new(5, 0));
        assert_eq!(field.next_piece().position(), Position::new(5, 0));
        assert!(!field.has_topped_out());
    }

    #[test]
    fn test_set_active_piece_rejects_collision() {
        let mut field = field();
        let before = field.active_piece();
        let outside = before.with_position(Position::new(-5, 3));
        assert_eq!(field.set_active_piece(outside), Err(PieceCollisionError));
        assert_eq!(field.active_piece(), before);

        let inside = before.with_position(Position::new(5, 6));
        assert_eq!(field.set_active_piece(inside), Ok(()));
        assert_eq!(field.active_piece(), inside);
    }

    #[test]
    fn test_lock_promotes_next_piece() {
        let mut field = field();
        let piece = Piece::new(ShapeKind::O).with_position(Position::new(5, 20));
        field.set_active_piece(piece).unwrap();
        let next = field.next_piece();

        assert_eq!(field.lock_active_piece(), 0);
        assert_eq!(field.active_piece(), next);
        assert_eq!(field.locked_cells().len(), 4);
        assert_eq!(
            field.locked_cells().get(Position::new(4, 19)),
            Some(ShapeKind::O.color())
        );
        assert!(!field.has_topped_out());
    }

    #[test]
    fn test_lock_clears_rows() {
        let locked: LockedCells = (0..10)
            .filter(|&x| x != 4 && x != 5)
            .flat_map(|x| [(Position::new(x, 18), Color::RED), (Position::new(x, 19), Color::RED)])
            .collect();
        let mut field = field().with_locked_cells(locked);
        let piece = Piece::new(ShapeKind::O).with_position(Position::new(5, 20));
        field.set_active_piece(piece).unwrap();

        assert_eq!(field.lock_active_piece(), 2);
        assert!(field.locked_cells().is_empty());
    }

    #[test]
    fn test_topped_out_threshold() {
        let at_row_one: LockedCells = [(Position::new(0, 1), Color::RED)].into_iter().collect();
        assert!(!field().with_locked_cells(at_row_one).has_topped_out());

        let at_row_zero: LockedCells = [(Position::new(0, 0), Color::RED)].into_iter().collect();
        assert!(field().with_locked_cells(at_row_zero).has_topped_out());

        let above: LockedCells = [(Position::new(3, -2), Color::RED)].into_iter().collect();
        assert!(field().with_locked_cells(above).has_topped_out());
    }
}
