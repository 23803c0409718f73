use crate::error::EngineError;

use super::Color;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// True iff `column` is a 1-based column number on the board.
pub fn is_valid(column: usize) -> bool {
    (1..=COLS).contains(&column)
}

/// One column of the board, filled bottom to top.
///
/// Columns are values: adding a piece returns a new column and leaves the
/// original untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Column {
    pieces: [Option<Color>; ROWS],
    len: usize,
}

impl Column {
    /// Create an empty column
    pub fn new() -> Self {
        Column::default()
    }

    /// Number of pieces in the column
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True while another piece fits on top.
    pub fn has_free_space(&self) -> bool {
        self.len < ROWS
    }

    /// Piece at `row`, counted from the bottom (row 0).
    pub fn get(&self, row: usize) -> Option<Color> {
        self.pieces.get(row).copied().flatten()
    }

    /// Pieces from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.pieces[..self.len].iter().flatten().copied()
    }

    /// Return a new column with `piece` on top.
    pub fn add_piece(&self, piece: Color) -> Result<Column, EngineError> {
        if !self.has_free_space() {
            return Err(EngineError::FullColumn);
        }
        let mut column = *self;
        column.pieces[column.len] = Some(piece);
        column.len += 1;
        Ok(column)
    }
}

/// The seven columns of the board, indexed by 1-based column number in the
/// public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameBoard {
    columns: [Column; COLS],
}

impl GameBoard {
    /// Create a new empty board
    pub fn new() -> Self {
        GameBoard::default()
    }

    /// Column for a 1-based column number.
    pub fn column(&self, column_number: usize) -> Result<&Column, EngineError> {
        if !is_valid(column_number) {
            return Err(EngineError::InvalidColumn);
        }
        Ok(&self.columns[column_number - 1])
    }

    /// Copy of the board with `column` stored at `column_number`.
    pub fn with_column(
        &self,
        column_number: usize,
        column: Column,
    ) -> Result<GameBoard, EngineError> {
        if !is_valid(column_number) {
            return Err(EngineError::InvalidColumn);
        }
        let mut board = *self;
        board.columns[column_number - 1] = column;
        Ok(board)
    }

    /// Drop `piece` into a column and return the resulting board.
    pub fn add_piece(&self, column_number: usize, piece: Color) -> Result<GameBoard, EngineError> {
        let column = self.column(column_number)?.add_piece(piece)?;
        self.with_column(column_number, column)
    }

    /// Columns left to right.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Total number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_bounds() {
        assert!(!is_valid(0));
        for column in 1..=7 {
            assert!(is_valid(column));
        }
        assert!(!is_valid(8));
        assert!(!is_valid(usize::MAX));
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = GameBoard::new();
        assert_eq!(board.columns().count(), COLS);
        assert!(board.columns().all(Column::is_empty));
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_add_piece_grows_column_by_one() {
        let mut column = Column::new();
        for expected in 1..=ROWS {
            let before = column.len();
            column = column.add_piece(Color::Red).unwrap();
            assert_eq!(column.len(), before + 1);
            assert_eq!(column.len(), expected);
            assert!(column.len() <= ROWS);
        }
    }

    #[test]
    fn test_add_piece_stacks_bottom_to_top() {
        let column = Column::new()
            .add_piece(Color::Red)
            .unwrap()
            .add_piece(Color::Black)
            .unwrap();
        assert_eq!(column.get(0), Some(Color::Red));
        assert_eq!(column.get(1), Some(Color::Black));
        assert_eq!(column.get(2), None);
        assert_eq!(column.iter().collect::<Vec<_>>(), vec![Color::Red, Color::Black]);
    }

    #[test]
    fn test_add_piece_leaves_original_untouched() {
        let column = Column::new().add_piece(Color::Red).unwrap();
        let taller = column.add_piece(Color::Black).unwrap();
        assert_eq!(column.len(), 1);
        assert_eq!(taller.len(), 2);
    }

    #[test]
    fn test_column_full() {
        let mut column = Column::new();
        for _ in 0..ROWS {
            column = column.add_piece(Color::Black).unwrap();
        }
        assert!(!column.has_free_space());
        assert_eq!(column.add_piece(Color::Red), Err(EngineError::FullColumn));
    }

    #[test]
    fn test_column_lookup_bounds() {
        let board = GameBoard::new();
        assert_eq!(board.column(0), Err(EngineError::InvalidColumn));
        assert_eq!(board.column(8), Err(EngineError::InvalidColumn));
        for column in 1..=COLS {
            assert!(board.column(column).is_ok());
        }
    }

    #[test]
    fn test_board_add_piece_touches_one_column() {
        let board = GameBoard::new();
        let updated = board.add_piece(3, Color::Red).unwrap();
        assert_eq!(updated.column(3).unwrap().get(0), Some(Color::Red));
        assert_eq!(updated.piece_count(), 1);
        assert_eq!(board.piece_count(), 0);
        for column in [1, 2, 4, 5, 6, 7] {
            assert!(updated.column(column).unwrap().is_empty());
        }
    }

    #[test]
    fn test_board_add_piece_invalid_column() {
        let board = GameBoard::new();
        assert_eq!(board.add_piece(9, Color::Red), Err(EngineError::InvalidColumn));
    }
}
