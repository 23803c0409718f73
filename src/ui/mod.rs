//! Model-update-view layer: the reducer that feeds clicks into the game
//! engine, the view that turns a model into a UI tree, the runtime that
//! coalesces redraws, and a terminal host for the tree.

mod reducer;
pub mod runtime;
pub mod terminal;
pub mod tree;
mod view;

pub use reducer::{update, Action, Model};
pub use runtime::{
    Dispatcher, FrameScheduler, Reducer, Renderer, Runtime, RuntimeMessage, TimerScheduler,
};
pub use terminal::TerminalRenderer;
pub use tree::{Patch, Tree};
pub use view::view;
