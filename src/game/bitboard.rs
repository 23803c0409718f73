use std::fmt;
use std::ops::{BitAnd, BitOr};

use super::board::{is_valid, Column, COLS, ROWS};
use super::Color;

/// Bits per column: six playable rows plus one guard bit that is never set.
pub const STRIDE: usize = ROWS + 1;

/// Shift deltas: vertical (1), horizontal (7) and the two diagonals (6, 8).
const DIRECTIONS: [u32; 4] = [1, STRIDE as u32 - 1, STRIDE as u32, STRIDE as u32 + 1];

const fn full_mask() -> u64 {
    let column = (1u64 << ROWS) - 1;
    let mut mask = 0;
    let mut c = 0;
    while c < COLS {
        mask |= column << (c * STRIDE);
        c += 1;
    }
    mask
}

/// Packed set of occupied cells. Cell (column `c`, row `r`), both 0-based
/// with row 0 at the bottom, lives at bit `c * 7 + r`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitBoard(u64);

impl BitBoard {
    pub const EMPTY: BitBoard = BitBoard(0);

    /// Every playable cell occupied.
    pub const FULL: BitBoard = BitBoard(full_mask());

    pub fn new(bits: u64) -> Self {
        BitBoard(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    /// Bit index for a 0-based column and row.
    pub fn index(column: usize, row: usize) -> usize {
        column * STRIDE + row
    }

    pub fn is_set(self, index: usize) -> bool {
        index < 64 && self.0 & (1 << index) != 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Mark the piece that was just placed on top of `column_after_insert`.
    ///
    /// The row is taken from the column's post-insert height, so this must be
    /// called with the column as it looks after the piece was added.
    pub fn add_bit(self, column_number: usize, column_after_insert: &Column) -> BitBoard {
        let Some(row) = column_after_insert.len().checked_sub(1) else {
            return self;
        };
        if !is_valid(column_number) {
            return self;
        }
        BitBoard(self.0 | 1 << Self::index(column_number - 1, row))
    }

    /// Four in a row in any direction.
    ///
    /// `pairs` marks every cell that starts a run of two along a direction;
    /// two such runs `2 * delta` apart make a run of four.
    pub fn is_winning(self) -> bool {
        let bb = self.0;
        DIRECTIONS.iter().fold(0, |found, &delta| {
            let pairs = bb & (bb >> delta);
            found | (pairs & (pairs >> (2 * delta)))
        }) != 0
    }

    /// Every playable cell is occupied.
    pub fn is_draw(self) -> bool {
        self == Self::FULL
    }
}

impl BitOr for BitBoard {
    type Output = BitBoard;

    fn bitor(self, rhs: BitBoard) -> BitBoard {
        BitBoard(self.0 | rhs.0)
    }
}

impl BitAnd for BitBoard {
    type Output = BitBoard;

    fn bitand(self, rhs: BitBoard) -> BitBoard {
        BitBoard(self.0 & rhs.0)
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitBoard({:#051b})", self.0)
    }
}

/// One occupancy mask per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlayerBoards {
    red: BitBoard,
    black: BitBoard,
}

impl PlayerBoards {
    pub fn new() -> Self {
        PlayerBoards::default()
    }

    pub fn get(&self, color: Color) -> BitBoard {
        match color {
            Color::Red => self.red,
            Color::Black => self.black,
        }
    }

    /// Copy with `color`'s board replaced.
    pub fn with(&self, color: Color, board: BitBoard) -> PlayerBoards {
        let mut boards = *self;
        match color {
            Color::Red => boards.red = board,
            Color::Black => boards.black = board,
        }
        boards
    }

    /// Union of both players' cells.
    pub fn union(&self) -> BitBoard {
        self.red | self.black
    }
}
