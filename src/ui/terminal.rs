//! Ratatui host for the UI tree.
//!
//! Mounting draws the tree and, when input is enabled, starts a thread that
//! reads crossterm events and posts them through the runtime's dispatcher.
//! Every element with a click handler is recorded as a hotspot so mouse
//! clicks can be mapped back to actions.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use crate::error::RuntimeError;

use super::runtime::{Dispatcher, Renderer};
use super::tree::{self, Element, Patch, Tag, Tree};
use super::Action;

/// Screen region that dispatches `action` when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotspot {
    pub area: Rect,
    pub action: Action,
}

type Hotspots = Arc<Mutex<Vec<Hotspot>>>;

pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    hotspots: Hotspots,
    read_input: bool,
}

impl<B: Backend> TerminalRenderer<B> {
    /// Renderer that only draws. Use [`with_input`](Self::with_input) to
    /// also read the keyboard and mouse.
    pub fn new(terminal: Terminal<B>) -> Self {
        TerminalRenderer {
            terminal,
            hotspots: Arc::new(Mutex::new(Vec::new())),
            read_input: false,
        }
    }

    pub fn with_input(mut self) -> Self {
        self.read_input = true;
        self
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Action under screen position (`x`, `y`), innermost hotspot first.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Action> {
        find_hotspot(&self.hotspots, x, y)
    }

    fn draw(&mut self, tree: &Tree) -> Result<(), RuntimeError> {
        let mut spots = Vec::new();
        self.terminal.draw(|frame| {
            let area = frame.area();
            render_tree(frame, tree, area, &mut spots);
        })?;
        if let Ok(mut hotspots) = self.hotspots.lock() {
            *hotspots = spots;
        }
        Ok(())
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    type Node = Tree;

    fn render(&mut self, dispatcher: &Dispatcher, tree: &Tree) -> Result<Tree, RuntimeError> {
        self.draw(tree)?;
        if self.read_input {
            spawn_input_thread(dispatcher.clone(), self.hotspots.clone());
        }
        Ok(tree.clone())
    }

    /// Apply `patch` and repaint. An empty patch still repaints, since a
    /// host-initiated `Draw` (e.g. after a resize) may find the screen cleared.
    fn patch(&mut self, mut root: Tree, patch: &Patch) -> Result<Tree, RuntimeError> {
        tree::apply(&mut root, patch);
        self.draw(&root)?;
        Ok(root)
    }
}

fn find_hotspot(hotspots: &Hotspots, x: u16, y: u16) -> Option<Action> {
    let hotspots = hotspots.lock().ok()?;
    hotspots
        .iter()
        .rev()
        .find(|spot| contains(spot.area, x, y))
        .map(|spot| spot.action)
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyBinding {
    Dispatch(Action),
    Quit,
}

fn key_binding(code: KeyCode) -> Option<KeyBinding> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyBinding::Quit),
        KeyCode::Char('n') | KeyCode::Char('r') => Some(KeyBinding::Dispatch(Action::NewGameClick)),
        KeyCode::Char(c @ '1'..='7') => c
            .to_digit(10)
            .map(|d| KeyBinding::Dispatch(Action::ColumnClick(d as usize))),
        _ => None,
    }
}

fn spawn_input_thread(dispatcher: Dispatcher, hotspots: Hotspots) {
    thread::spawn(move || loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                debug!(error = %e, "input polling failed");
                dispatcher.stop();
                return;
            }
        }
        let posted = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key_binding(key.code) {
                Some(KeyBinding::Dispatch(action)) => dispatcher.dispatch(action),
                Some(KeyBinding::Quit) => {
                    dispatcher.stop();
                    return;
                }
                None => true,
            },
            Ok(Event::Mouse(mouse)) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                match find_hotspot(&hotspots, mouse.column, mouse.row) {
                    Some(action) => dispatcher.dispatch(action),
                    None => true,
                }
            }
            Ok(Event::Resize(_, _)) => dispatcher.draw(),
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "input read failed");
                true
            }
        };
        if !posted {
            return;
        }
    });
}

/// Rows an element wants.
fn height(tree: &Tree) -> u16 {
    match tree {
        Tree::Text(_) => 1,
        Tree::Element(element) => match element.tag {
            Tag::Title | Tag::Button => 3,
            Tag::Piece => 1,
            Tag::Stack => element.children.iter().map(height).sum(),
            Tag::Row => element.children.iter().map(height).max().unwrap_or(0),
        },
    }
}

/// Columns an element wants.
fn width(tree: &Tree) -> u16 {
    match tree {
        Tree::Text(text) => text.chars().count() as u16,
        Tree::Element(element) => match element.tag {
            Tag::Title | Tag::Button => tree.text_content().chars().count() as u16 + 4,
            Tag::Piece => 3,
            Tag::Stack => element.children.iter().map(width).max().unwrap_or(0),
            Tag::Row => element.children.iter().map(width).sum(),
        },
    }
}

fn render_tree(frame: &mut Frame, tree: &Tree, area: Rect, spots: &mut Vec<Hotspot>) {
    match tree {
        Tree::Text(text) => {
            let widget = Paragraph::new(text.as_str())
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);
            frame.render_widget(widget, area);
        }
        Tree::Element(element) => {
            let area = match element.tag {
                Tag::Button | Tag::Row => centered(area, width(tree)),
                _ => area,
            };
            if let Some(action) = element.on_click {
                spots.push(Hotspot { area, action });
            }
            render_element(frame, element, tree, area, spots);
        }
    }
}

fn render_element(
    frame: &mut Frame,
    element: &Element,
    tree: &Tree,
    area: Rect,
    spots: &mut Vec<Hotspot>,
) {
    match element.tag {
        Tag::Title => {
            let widget = Paragraph::new(tree.text_content())
                .style(Style::default().add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(widget, area);
        }
        Tag::Button => {
            let widget = Paragraph::new(tree.text_content())
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(widget, area);
        }
        Tag::Piece => {
            let (symbol, color) = match element.class {
                Some("red") => (" ● ", Color::Red),
                Some("black") => (" ● ", Color::White),
                _ => (" . ", Color::DarkGray),
            };
            frame.render_widget(Span::styled(symbol, Style::default().fg(color)), area);
        }
        Tag::Stack => {
            let constraints = element
                .children
                .iter()
                .map(|child| Constraint::Length(height(child)))
                .chain([Constraint::Min(0)]);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(area);
            for (child, chunk) in element.children.iter().zip(chunks.iter()) {
                render_tree(frame, child, *chunk, spots);
            }
        }
        Tag::Row => {
            let constraints = element
                .children
                .iter()
                .map(|child| Constraint::Length(width(child)));
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(constraints)
                .split(area);
            for (child, chunk) in element.children.iter().zip(chunks.iter()) {
                render_tree(frame, child, *chunk, spots);
            }
        }
    }
}

/// Horizontally center a region `wanted` columns wide inside `area`.
fn centered(area: Rect, wanted: u16) -> Rect {
    let wanted = wanted.min(area.width);
    Rect {
        x: area.x + (area.width - wanted) / 2,
        width: wanted,
        ..area
    }
}
