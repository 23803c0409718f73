use crate::game::{Color, Column, ROWS};

use super::tree::{Element, Tag, Tree};
use super::{Action, Model};

/// Child index of the status line under the root.
pub const STATUS_PATH: [usize; 1] = [1];
/// Child index of the board row under the root.
pub const BOARD_PATH: [usize; 1] = [2];

/// Render the model as a UI tree.
///
/// Layout: title, status line, a row of seven clickable columns (cells listed
/// top row first), and the "New Game" button.
pub fn view(model: &Model) -> Tree {
    let state = model.game_state();

    let columns = state
        .game_board()
        .columns()
        .enumerate()
        .map(|(index, column)| render_column(index + 1, column));

    Element::new(Tag::Stack)
        .class("game")
        .child(Element::new(Tag::Title).child("Connect Four"))
        .child(state.status().to_string())
        .child(Element::new(Tag::Row).class("board").children(columns))
        .child(
            Element::new(Tag::Button)
                .class("new-game")
                .on_click(Action::NewGameClick)
                .child("New Game"),
        )
        .into()
}

fn render_column(column_number: usize, column: &Column) -> Element {
    let cells = (0..ROWS)
        .rev()
        .map(|row| Element::new(Tag::Piece).class(piece_class(column.get(row))));

    Element::new(Tag::Stack)
        .class("column")
        .on_click(Action::ColumnClick(column_number))
        .children(cells)
}

fn piece_class(piece: Option<Color>) -> &'static str {
    match piece {
        Some(Color::Red) => "red",
        Some(Color::Black) => "black",
        None => "empty",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::COLS;
    use crate::ui::update;

    fn element(tree: &Tree) -> &Element {
        match tree {
            Tree::Element(element) => element,
            Tree::Text(text) => panic!("expected element, found text {text:?}"),
        }
    }

    #[test]
    fn test_status_text_follows_game() {
        let model = Model::new();
        let tree = view(&model);
        assert_eq!(tree.node(&STATUS_PATH), Some(&Tree::text("Red Player's Turn")));

        let (model, _) = update(&model, Action::ColumnClick(1));
        let tree = view(&model);
        assert_eq!(tree.node(&STATUS_PATH), Some(&Tree::text("Black Player's Turn")));
    }

    #[test]
    fn test_board_has_clickable_columns() {
        let tree = view(&Model::new());
        let board = tree.node(&BOARD_PATH).unwrap();
        assert_eq!(board.children().len(), COLS);
        for (index, column) in board.children().iter().enumerate() {
            let column = element(column);
            assert_eq!(column.on_click, Some(Action::ColumnClick(index + 1)));
            assert_eq!(column.children.len(), ROWS);
            assert!(column
                .children
                .iter()
                .all(|cell| element(cell).class == Some("empty")));
        }
    }

    #[test]
    fn test_pieces_render_top_row_first() {
        let model = [2, 2]
            .iter()
            .fold(Model::new(), |model, &c| update(&model, Action::ColumnClick(c)).0);
        let tree = view(&model);
        let column = element(tree.node(&[2, 1]).unwrap());
        let classes: Vec<_> = column
            .children
            .iter()
            .map(|cell| element(cell).class.unwrap())
            .collect();
        assert_eq!(classes, vec!["empty", "empty", "empty", "empty", "black", "red"]);
    }

    #[test]
    fn test_new_game_button() {
        let tree = view(&Model::new());
        let button = element(tree.node(&[3]).unwrap());
        assert_eq!(button.tag, Tag::Button);
        assert_eq!(button.on_click, Some(Action::NewGameClick));
        assert_eq!(tree.node(&[3]).unwrap().text_content(), "New Game");
    }
}
