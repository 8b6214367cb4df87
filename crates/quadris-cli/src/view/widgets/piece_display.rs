use quadris_engine::{Cell, PiecePreview};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::CellDisplay;

/// Preview of the on-deck piece, cropped to its occupied cells.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PiecePreview>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PiecePreview) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        4 * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Bounding box `(column, row, width, height)` of the occupied mask cells.
fn occupied_bounds(piece: &PiecePreview) -> Option<(usize, usize, usize, usize)> {
    let cells = || piece.mask.occupied_cells();
    let min_col = cells().map(|(c, _)| c).min()?;
    let max_col = cells().map(|(c, _)| c).max()?;
    let min_row = cells().map(|(_, r)| r).min()?;
    let max_row = cells().map(|(_, r)| r).max()?;
    Some((min_col, min_row, max_col - min_col + 1, max_row - min_row + 1))
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let Some((left, top, width, height)) = occupied_bounds(&piece) else {
            return;
        };
        // masks are 5x5, so the sizes always fit
        let cols = u16::try_from(width).unwrap_or_default();
        let rows = u16::try_from(height).unwrap_or_default();

        let piece_area = area.centered(
            Constraint::Length(cols * CellDisplay::WIDTH),
            Constraint::Length(rows * CellDisplay::HEIGHT),
        );
        let horizontal = Layout::horizontal((0..cols).map(|_| Constraint::Length(CellDisplay::WIDTH)))
            .flex(Flex::Center);
        let vertical = Layout::vertical((0..rows).map(|_| Constraint::Length(CellDisplay::HEIGHT)));
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                let cell = if piece.mask.is_occupied(left + x, top + y) {
                    Cell::Occupied(piece.color)
                } else {
                    Cell::Empty
                };
                CellDisplay::from_cell(cell, false).render(grid_cell, buf);
            }
        }
    }
}
