//! Core Connect Four rules: columns and board, bit-packed occupancy, and the
//! immutable game state with its move pipeline.

mod bitboard;
mod board;
mod player;
mod state;

pub use crate::error::EngineError;
pub use bitboard::{BitBoard, PlayerBoards, STRIDE};
pub use board::{is_valid, Column, GameBoard, COLS, ROWS};
pub use player::Color;
pub use state::{GameState, GameStatus};
