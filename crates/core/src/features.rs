//! Grid features used for reward shaping.
//!
//! Computed over the visible rows of a locked grid; the active piece is not
//! part of the grid and never counts.

use crate::board::Board;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridFeatures {
    /// Tallest column height.
    pub max_height: u32,
    /// Sum of all column heights.
    pub aggregate_height: u32,
    /// Empty cells with at least one filled cell above them in the same column.
    pub holes: u32,
    /// Sum of absolute height differences between neighboring columns.
    pub bumpiness: u32,
}

/// Compute classic Tetris features on the visible field.
/// Complexity: O(width * height).
pub fn compute_grid_features(board: &Board) -> GridFeatures {
    let width = board.width() as i8;
    let height = board.height() as i8;

    let mut features = GridFeatures::default();
    let mut prev_height: Option<u32> = None;

    for x in 0..width {
        let top = (0..height).find(|&y| board.is_occupied(x, y));
        let column_height = top.map_or(0, |y| (height - y) as u32);

        if let Some(top) = top {
            features.holes += ((top + 1)..height)
                .filter(|&y| board.is_valid(x, y))
                .count() as u32;
        }

        features.max_height = features.max_height.max(column_height);
        features.aggregate_height += column_height;
        if let Some(prev) = prev_height {
            features.bumpiness += prev.abs_diff(column_height);
        }
        prev_height = Some(column_height);
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn empty_board_has_no_features() {
        let board = Board::default();
        assert_eq!(compute_grid_features(&board), GridFeatures::default());
    }

    #[test]
    fn counts_holes_and_heights() {
        let mut board = Board::default();
        // Column 0: block at row 17 over two empty cells.
        board.set(0, 17, Some(PieceKind::T));
        // Column 1: solid stack of two.
        board.set(1, 18, Some(PieceKind::T));
        board.set(1, 19, Some(PieceKind::T));

        let f = compute_grid_features(&board);
        assert_eq!(f.holes, 2);
        assert_eq!(f.max_height, 3);
        assert_eq!(f.aggregate_height, 5);
        // |3-2| + |2-0|
        assert_eq!(f.bumpiness, 3);
    }

    #[test]
    fn buffer_rows_are_ignored() {
        let mut board = Board::default();
        board.set(4, -1, Some(PieceKind::O));
        assert_eq!(compute_grid_features(&board), GridFeatures::default());
    }
}
