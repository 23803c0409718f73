use std::fmt;

use crate::error::EngineError;

use super::{BitBoard, Color, GameBoard, PlayerBoards};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Whose move is next.
    Turn(Color),
    Winner(Color),
    Tie,
}

impl GameStatus {
    /// Hand the move to the other player. Terminal statuses are unchanged.
    pub fn swap_turn(self) -> GameStatus {
        match self {
            GameStatus::Turn(color) => GameStatus::Turn(color.other()),
            other => other,
        }
    }

    /// Check if game is over
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Turn(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Turn(color) => write!(f, "{color} Player's Turn"),
            GameStatus::Winner(color) => write!(f, "{color} Player Wins!"),
            GameStatus::Tie => f.write_str("Draw Game"),
        }
    }
}

/// Immutable snapshot of a game.
///
/// `bit_board` is always the union of both player boards, and each column's
/// height in `game_board` matches the number of bits set in its slice of
/// `bit_board`. Moves never modify a state; they return a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    status: GameStatus,
    game_board: GameBoard,
    player_boards: PlayerBoards,
    bit_board: BitBoard,
}

impl GameState {
    /// Create initial game state
    pub fn new() -> Self {
        GameState {
            status: GameStatus::Turn(Color::Red),
            game_board: GameBoard::new(),
            player_boards: PlayerBoards::new(),
            bit_board: BitBoard::EMPTY,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Get reference to board
    pub fn game_board(&self) -> &GameBoard {
        &self.game_board
    }

    pub fn player_boards(&self) -> &PlayerBoards {
        &self.player_boards
    }

    /// Combined occupancy of both players.
    pub fn bit_board(&self) -> BitBoard {
        self.bit_board
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Board with `piece` dropped into `column_number`.
    pub fn update_game_board(
        &self,
        column_number: usize,
        piece: Color,
    ) -> Result<GameBoard, EngineError> {
        self.game_board.add_piece(column_number, piece)
    }

    /// Combined occupancy after the move that produced `board_after`.
    pub fn update_bit_board(&self, column_number: usize, board_after: &GameBoard) -> BitBoard {
        match board_after.column(column_number) {
            Ok(column) => self.bit_board.add_bit(column_number, column),
            Err(_) => self.bit_board,
        }
    }

    /// Player boards after the move; only the mover's board changes.
    pub fn update_player_boards(
        &self,
        column_number: usize,
        piece: Color,
        board_after: &GameBoard,
    ) -> PlayerBoards {
        let Ok(column) = board_after.column(column_number) else {
            return self.player_boards;
        };
        let mover = self.player_boards.get(piece).add_bit(column_number, column);
        self.player_boards.with(piece, mover)
    }

    /// Status after `piece` has moved. A win beats a full board.
    pub fn update_status(
        &self,
        piece: Color,
        player_boards: &PlayerBoards,
        bit_board: BitBoard,
    ) -> GameStatus {
        if player_boards.get(piece).is_winning() {
            GameStatus::Winner(piece)
        } else if bit_board.is_draw() {
            GameStatus::Tie
        } else {
            self.status.swap_turn()
        }
    }

    /// Drop the current player's piece into a 1-based column.
    ///
    /// Once the game is over this returns the state unchanged. An invalid or
    /// full column aborts the move before anything is built.
    pub fn drop_piece(&self, column_number: usize) -> Result<GameState, EngineError> {
        let GameStatus::Turn(piece) = self.status else {
            return Ok(*self);
        };

        let game_board = self.update_game_board(column_number, piece)?;
        let bit_board = self.update_bit_board(column_number, &game_board);
        let player_boards = self.update_player_boards(column_number, piece, &game_board);
        let status = self.update_status(piece, &player_boards, bit_board);

        Ok(GameState {
            status,
            game_board,
            player_boards,
            bit_board,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
