//! Mapping between terminal cells and board squares.

use checkmate_client::Square;
use ratatui::layout::Rect;

/// Terminal columns per square.
pub const CELL_WIDTH: u16 = 5;
/// Terminal rows per square.
pub const CELL_HEIGHT: u16 = 2;
/// Width of the whole 8x8 grid.
pub const BOARD_WIDTH: u16 = CELL_WIDTH * 8;
/// Height of the whole 8x8 grid.
pub const BOARD_HEIGHT: u16 = CELL_HEIGHT * 8;

/// Where the grid was last drawn. White sits at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardLayout {
    x: u16,
    y: u16,
}

impl BoardLayout {
    /// Layout with the grid's top-left cell at `(x, y)`.
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Left edge of the grid.
    pub fn x(&self) -> u16 {
        self.x
    }

    /// Top edge of the grid.
    pub fn y(&self) -> u16 {
        self.y
    }

    /// Square under terminal cell `(column, row)`.
    pub fn square_at(&self, column: u16, row: u16) -> Option<Square> {
        let dx = column.checked_sub(self.x)?;
        let dy = row.checked_sub(self.y)?;
        let file = usize::from(dx / CELL_WIDTH);
        let from_top = usize::from(dy / CELL_HEIGHT);
        if from_top >= 8 {
            return None;
        }
        Square::from_indexes(file, 7 - from_top)
    }

    /// Terminal area of `square`.
    pub fn cell(&self, square: Square) -> Rect {
        let file = square_index(square.file(), 'a');
        let rank = square_index(square.rank(), '1');
        Rect::new(
            self.x + file * CELL_WIDTH,
            self.y + (7 - rank) * CELL_HEIGHT,
            CELL_WIDTH,
            CELL_HEIGHT,
        )
    }
}

fn square_index(label: char, first: char) -> u16 {
    (label as u16).saturating_sub(first as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_at_corners() {
        let layout = BoardLayout::new(10, 4);
        assert_eq!(layout.square_at(10, 4).map(|s| s.to_string()).as_deref(), Some("a8"));
        assert_eq!(
            layout
                .square_at(10 + BOARD_WIDTH - 1, 4 + BOARD_HEIGHT - 1)
                .map(|s| s.to_string())
                .as_deref(),
            Some("h1")
        );
        assert_eq!(layout.square_at(9, 4), None);
        assert_eq!(layout.square_at(10 + BOARD_WIDTH, 4), None);
        assert_eq!(layout.square_at(10, 4 + BOARD_HEIGHT), None);
    }

    #[test]
    fn test_cell_inverts_square_at() {
        let layout = BoardLayout::new(3, 2);
        for square in Square::all() {
            let cell = layout.cell(square);
            assert_eq!(layout.square_at(cell.x, cell.y), Some(square));
        }
    }
}
