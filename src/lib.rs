//! # Connect Four
//!
//! Two-player Connect Four on a fixed 7×6 board. The rules live in a pure,
//! immutable engine that detects four in a row with a few shifts on packed
//! bit-boards; the UI is a model-update-view loop whose runtime applies every
//! click immediately but redraws at most once per animation frame.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: columns, bit-boards, game state and moves
//! - [`ui`]: Reducer, view, UI tree diffing, render runtime, terminal host
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
