use tracing::{info, warn};

use crate::game::GameState;

/// Something the player did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Click on a column, numbered 1 through 7.
    ColumnClick(usize),
    NewGameClick,
}

/// UI model: one game snapshot, replaced wholesale on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Model {
    game_state: GameState,
}

impl Model {
    /// Fresh game with Red to move.
    pub fn new() -> Self {
        Model {
            game_state: GameState::new(),
        }
    }

    pub fn from_state(game_state: GameState) -> Self {
        Model { game_state }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }
}

/// Apply one action. Returns the next model and any follow-up actions.
///
/// A rejected move is logged and the model is returned unchanged.
pub fn update(model: &Model, action: Action) -> (Model, Vec<Action>) {
    match action {
        Action::NewGameClick => (Model::new(), Vec::new()),
        Action::ColumnClick(column) => match model.game_state.drop_piece(column) {
            Ok(game_state) => {
                if game_state.is_terminal() && !model.game_state.is_terminal() {
                    info!(status = %game_state.status(), "game over");
                }
                (Model::from_state(game_state), Vec::new())
            }
            Err(error) => {
                warn!(%error, column, "move rejected");
                (*model, Vec::new())
            }
        },
    }
}
