use std::{collections::BTreeMap, mem};

use serde::{Deserialize, Serialize};

use super::{piece::Piece, position::Position, shape::Color};

/// A single cell of the projected board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Color),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Playable board dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    width: u16,
    height: u16,
}

impl BoardSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(self) -> u16 {
        self.height
    }

    fn index(self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let width = usize::from(self.width);
        (x < width && y < usize::from(self.height)).then_some(y * width + x)
    }
}

/// Cells contributed by settled pieces, each tagged with its color.
///
/// This is the only mutable board state; [`Board`] is always projected from it.
/// Iteration is row-major (top row first, then left to right).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockedCells {
    cells: BTreeMap<Position, Color>,
}

impl FromIterator<(Position, Color)> for LockedCells {
    fn from_iter<T: IntoIterator<Item = (Position, Color)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl LockedCells {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Color> {
        self.cells.get(&pos).copied()
    }

    pub fn insert(&mut self, pos: Position, color: Color) {
        self.cells.insert(pos, color);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.cells.iter().map(|(pos, color)| (*pos, *color))
    }

    /// Returns the smallest row index holding a locked cell.
    #[must_use]
    pub fn top_row(&self) -> Option<i32> {
        self.cells.keys().next().map(|pos| pos.y)
    }

    /// Removes every full row and shifts the cells above them.
    ///
    /// Rows are scanned bottom to top. A row is full when every column of the
    /// projected board is occupied. The full rows are removed as one batch, and every
    /// remaining cell strictly above the topmost cleared row moves down by the number
    /// of rows removed. All other cells stay in place, including cells lying between
    /// two cleared rows. Cells are re-inserted from the lowest row upward, so a shifted
    /// cell landing on a kept one replaces it.
    ///
    /// Returns the number of rows cleared.
    ///
    /// # Example
    ///
    /// ```
    /// use quadris_engine::{BoardSize, Color, LockedCells, Position};
    ///
    /// let size = BoardSize::new(2, 3);
    /// let mut locked: LockedCells = [
    ///     (Position::new(0, 0), Color::RED),
    ///     (Position::new(0, 2), Color::BLUE),
    ///     (Position::new(1, 2), Color::BLUE),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// assert_eq!(locked.clear_full_rows(size), 1);
    /// assert_eq!(locked.get(Position::new(0, 1)), Some(Color::RED));
    /// assert_eq!(locked.len(), 1);
    /// ```
    pub fn clear_full_rows(&mut self, size: BoardSize) -> usize {
        let board = Board::project(size, self);
        let full_rows: Vec<i32> = (0..i32::from(size.height))
            .rev()
            .filter(|&y| board.is_row_full(y))
            .collect();
        let Some(&clear_boundary) = full_rows.last() else {
            return 0;
        };
        let shift = i32::try_from(full_rows.len()).unwrap_or(i32::MAX);

        let remaining = mem::take(&mut self.cells);
        for (pos, color) in remaining.into_iter().rev() {
            if full_rows.contains(&pos.y) {
                continue;
            }
            let pos = if pos.y < clear_boundary {
                pos.offset(0, shift)
            } else {
                pos
            };
            self.cells.insert(pos, color);
        }

        full_rows.len()
    }
}

/// Full W×H grid of cells, projected from [`LockedCells`].
///
/// # Example
///
/// ```
/// use quadris_engine::{Board, BoardSize, Cell, Color, LockedCells, Position};
///
/// let mut locked = LockedCells::new();
/// locked.insert(Position::new(1, 2), Color::CYAN);
///
/// let board = Board::project(BoardSize::new(4, 3), &locked);
/// assert_eq!(board.cell(Position::new(1, 2)), Some(Cell::Occupied(Color::CYAN)));
/// assert!(board.is_open(Position::new(0, 2)));
/// assert!(board.is_open(Position::new(1, -3)));
/// assert!(!board.is_open(Position::new(-1, -3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl Board {
    #[must_use]
    pub fn empty(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; usize::from(size.width) * usize::from(size.height)],
        }
    }

    /// Builds the grid: `Occupied` at every locked coordinate inside the board,
    /// `Empty` elsewhere. Locked cells outside the board are not represented.
    #[must_use]
    pub fn project(size: BoardSize, locked: &LockedCells) -> Self {
        let mut board = Self::empty(size);
        for (pos, color) in locked.iter() {
            board.fill_cell(pos, Cell::Occupied(color));
        }
        board
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the cell at `pos`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.size.index(pos).map(|i| self.cells[i])
    }

    /// Returns whether a piece cell may occupy `pos`.
    ///
    /// Columns outside `[0, width)` are never open. Rows above the board are always
    /// open, so pieces can spawn and rotate before they become visible. Rows at or
    /// below `height` are never open.
    #[must_use]
    pub fn is_open(&self, pos: Position) -> bool {
        if pos.x < 0 || pos.x >= i32::from(self.size.width) {
            return false;
        }
        if pos.y < 0 {
            return true;
        }
        self.cell(pos).is_some_and(Cell::is_empty)
    }

    #[must_use]
    pub fn is_row_full(&self, y: i32) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(|c| !c.is_empty()))
    }

    #[must_use]
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        let start = self.size.index(Position::new(0, y))?;
        Some(&self.cells[start..][..usize::from(self.size.width)])
    }

    /// Iterates over the rows from top to bottom. A zero-width board has no rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // a zero-width board has no cells, so any chunk size yields nothing
        self.cells.chunks(usize::from(self.size.width).max(1))
    }

    /// Overlays a piece with its color. Cells outside the board are skipped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let cell = Cell::Occupied(piece.color());
        for pos in piece.occupied_cells() {
            self.fill_cell(pos, cell);
        }
    }

    fn fill_cell(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.size.index(pos) {
            self.cells[i] = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const SIZE: BoardSize = BoardSize::new(6, 8);

    fn fill_row(locked: &mut LockedCells, y: i32, color: Color) {
        for x in 0..i32::from(SIZE.width()) {
            locked.insert(Position::new(x, y), color);
        }
    }

    #[test]
    fn test_project_empty() {
        let board = Board::project(SIZE, &LockedCells::new());
        assert_eq!(board.rows().count(), 8);
        assert!(board.rows().all(|row| row.len() == 6));
        assert!(board.rows().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_project_skips_cells_above_board() {
        let locked: LockedCells = [
            (Position::new(2, -1), Color::RED),
            (Position::new(2, 0), Color::GREEN),
        ]
        .into_iter()
        .collect();
        let board = Board::project(SIZE, &locked);
        assert_eq!(board.cell(Position::new(2, -1)), None);
        assert_eq!(
            board.cell(Position::new(2, 0)),
            Some(Cell::Occupied(Color::GREEN))
        );
        assert_eq!(board.rows().flatten().filter(|c| !c.is_empty()).count(), 1);
    }

    #[test]
    fn test_is_open_bounds() {
        let mut locked = LockedCells::new();
        locked.insert(Position::new(3, 4), Color::BLUE);
        let board = Board::project(SIZE, &locked);

        assert!(board.is_open(Position::new(0, 0)));
        assert!(board.is_open(Position::new(5, 7)));
        assert!(!board.is_open(Position::new(3, 4)));

        // above the board: open only inside the columns
        assert!(board.is_open(Position::new(3, -1)));
        assert!(board.is_open(Position::new(0, -10)));
        assert!(!board.is_open(Position::new(-1, -1)));
        assert!(!board.is_open(Position::new(6, -1)));

        // beside and below the board
        assert!(!board.is_open(Position::new(-1, 3)));
        assert!(!board.is_open(Position::new(6, 3)));
        assert!(!board.is_open(Position::new(2, 8)));
    }

    #[test]
    fn test_clear_no_full_rows_is_noop() {
        let mut locked = LockedCells::new();
        for x in 0..5 {
            locked.insert(Position::new(x, 7), Color::RED);
        }
        locked.insert(Position::new(1, 3), Color::BLUE);
        let before = locked.clone();

        assert_eq!(locked.clear_full_rows(SIZE), 0);
        assert_eq!(locked, before);
    }

    #[test]
    fn test_clear_single_bottom_row() {
        let mut locked = LockedCells::new();
        fill_row(&mut locked, 7, Color::CYAN);
        locked.insert(Position::new(0, 6), Color::RED);
        locked.insert(Position::new(4, 2), Color::BLUE);

        assert_eq!(locked.clear_full_rows(SIZE), 1);
        assert_eq!(locked.len(), 2);
        assert_eq!(locked.get(Position::new(0, 7)), Some(Color::RED));
        assert_eq!(locked.get(Position::new(4, 3)), Some(Color::BLUE));
    }

    #[test]
    fn test_clear_contiguous_rows() {
        let mut locked = LockedCells::new();
        fill_row(&mut locked, 6, Color::CYAN);
        fill_row(&mut locked, 7, Color::CYAN);
        locked.insert(Position::new(1, 5), Color::RED);
        locked.insert(Position::new(1, 4), Color::GREEN);

        assert_eq!(locked.clear_full_rows(SIZE), 2);
        let cells: Vec<_> = locked.iter().collect();
        assert_eq!(
            cells,
            vec![
                (Position::new(1, 6), Color::GREEN),
                (Position::new(1, 7), Color::RED),
            ]
        );
    }

    #[test]
    fn test_clear_non_contiguous_rows() {
        let mut locked = LockedCells::new();
        fill_row(&mut locked, 3, Color::CYAN);
        fill_row(&mut locked, 6, Color::CYAN);
        // below the lowest cleared row
        locked.insert(Position::new(0, 7), Color::RED);
        // between the cleared rows
        locked.insert(Position::new(2, 5), Color::GREEN);
        // above the topmost cleared row
        locked.insert(Position::new(4, 2), Color::BLUE);
        locked.insert(Position::new(5, 0), Color::YELLOW);

        assert_eq!(locked.clear_full_rows(SIZE), 2);
        assert_eq!(locked.len(), 4);
        assert_eq!(locked.get(Position::new(0, 7)), Some(Color::RED));
        assert_eq!(locked.get(Position::new(2, 5)), Some(Color::GREEN));
        assert_eq!(locked.get(Position::new(4, 4)), Some(Color::BLUE));
        assert_eq!(locked.get(Position::new(5, 2)), Some(Color::YELLOW));
    }

    #[test]
    fn test_clear_keeps_cells_between_cleared_rows() {
        let size = BoardSize::new(3, 8);
        let mut locked = LockedCells::new();
        for x in 0..3 {
            locked.insert(Position::new(x, 3), Color::CYAN);
            locked.insert(Position::new(x, 6), Color::CYAN);
        }
        locked.insert(Position::new(1, 5), Color::GREEN);
        locked.insert(Position::new(0, 2), Color::BLUE);

        assert_eq!(locked.clear_full_rows(size), 2);
        let cells: Vec<_> = locked.iter().collect();
        assert_eq!(
            cells,
            vec![
                (Position::new(0, 4), Color::BLUE),
                (Position::new(1, 5), Color::GREEN),
            ]
        );
    }

    #[test]
    fn test_clear_shifted_cell_replaces_kept_cell() {
        let size = BoardSize::new(3, 8);
        let mut locked = LockedCells::new();
        for x in 0..3 {
            locked.insert(Position::new(x, 3), Color::CYAN);
            locked.insert(Position::new(x, 5), Color::CYAN);
        }
        // (1, 2) shifts by 2 onto the kept cell at (1, 4)
        locked.insert(Position::new(1, 4), Color::GREEN);
        locked.insert(Position::new(1, 2), Color::BLUE);

        assert_eq!(locked.clear_full_rows(size), 2);
        assert_eq!(locked.len(), 1);
        assert_eq!(locked.get(Position::new(1, 4)), Some(Color::BLUE));
    }

    #[test]
    fn test_zero_width_board_has_no_rows() {
        let board = Board::project(BoardSize::new(0, 4), &LockedCells::new());
        assert_eq!(board.rows().count(), 0);
        assert_eq!(board.row(0), None);
        assert!(!board.is_open(Position::new(0, -1)));
    }

    #[test]
    fn test_clear_shifts_cells_above_board() {
        let mut locked = LockedCells::new();
        fill_row(&mut locked, 7, Color::CYAN);
        locked.insert(Position::new(3, -1), Color::RED);

        assert_eq!(locked.clear_full_rows(SIZE), 1);
        assert_eq!(locked.get(Position::new(3, 0)), Some(Color::RED));
        assert_eq!(locked.top_row(), Some(0));
    }

    #[test]
    fn test_fill_piece_skips_hidden_cells() {
        let mut board = Board::empty(SIZE);
        // vertical I-piece anchored so that only its bottom cell is visible
        let piece = Piece::new(crate::ShapeKind::I).with_position(Position::new(2, 1));
        board.fill_piece(&piece);
        let occupied: Vec<_> = (0..8)
            .filter(|&y| board.cell(Position::new(2, y)) != Some(Cell::Empty))
            .collect();
        assert_eq!(occupied, vec![0]);
        assert_eq!(board.rows().flatten().filter(|c| !c.is_empty()).count(), 1);
    }

    fn arb_locked() -> impl Strategy<Value = (LockedCells, Vec<i32>)> {
        (
            prop::collection::btree_set((0..6_i32, 0..8_i32), 0..30),
            prop::collection::btree_set(0..8_i32, 0..4),
        )
            .prop_map(|(scattered, full_rows)| {
                let mut locked = LockedCells::new();
                for (x, y) in scattered {
                    // keep scattered rows partial so only `full_rows` are full
                    if x != 0 {
                        locked.insert(Position::new(x, y), Color::RED);
                    }
                }
                for &y in &full_rows {
                    fill_row(&mut locked, y, Color::CYAN);
                }
                (locked, full_rows.into_iter().collect())
            })
    }

    proptest! {
        #[test]
        fn prop_clear_full_rows((locked, full_rows) in arb_locked()) {
            let mut cleared = locked.clone();
            let count = cleared.clear_full_rows(SIZE);
            prop_assert_eq!(count, full_rows.len());

            // shifted cells may land on kept cells between cleared rows
            let removed = full_rows.len() * usize::from(SIZE.width());
            prop_assert!(cleared.len() <= locked.len() - removed);

            if let (Some(&top), Some(&bottom)) = (full_rows.first(), full_rows.last()) {
                let k = i32::try_from(count).unwrap();
                for (pos, color) in locked.iter() {
                    if pos.y < top {
                        prop_assert_eq!(cleared.get(pos.offset(0, k)), Some(color));
                    } else if pos.y > bottom {
                        prop_assert_eq!(cleared.get(pos), Some(color));
                    }
                }
            } else {
                prop_assert_eq!(cleared, locked);
            }
        }
    }
}
