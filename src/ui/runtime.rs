//! Single-threaded update/view runtime.
//!
//! The [`Runtime`] owns the authoritative [`Model`] and drains one mailbox.
//! Actions are reduced as soon as they arrive; drawing is deferred to a
//! `Draw` tick scheduled one frame interval later, so any number of actions
//! between two ticks costs a single diff/patch.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;
use std::time::Duration;

use tracing::{debug, debug_span};

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;

use super::tree::{self, Patch, Tree};
use super::{update, view, Action, Model};

/// Mailbox message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMessage {
    Message(Action),
    Draw,
    /// Leave the run loop.
    Stop,
}

/// Whether a `Draw` tick is already on its way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequest {
    NoRequest,
    InProgress,
}

/// Cloneable handle for posting into a runtime's mailbox.
///
/// Sends block while the mailbox is full. Each method returns `false` once
/// the runtime has been dropped.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    sender: SyncSender<RuntimeMessage>,
}

impl Dispatcher {
    pub fn dispatch(&self, action: Action) -> bool {
        self.send(RuntimeMessage::Message(action))
    }

    pub fn draw(&self) -> bool {
        self.send(RuntimeMessage::Draw)
    }

    pub fn stop(&self) -> bool {
        self.send(RuntimeMessage::Stop)
    }

    fn send(&self, message: RuntimeMessage) -> bool {
        self.sender.send(message).is_ok()
    }
}

/// Source of delayed `Draw` ticks.
pub trait FrameScheduler {
    /// Arrange for `dispatcher.draw()` to be called after `delay`.
    fn schedule(&self, dispatcher: Dispatcher, delay: Duration);
}

/// Posts each tick from a short-lived sleeper thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerScheduler;

impl FrameScheduler for TimerScheduler {
    fn schedule(&self, dispatcher: Dispatcher, delay: Duration) {
        thread::spawn(move || {
            thread::sleep(delay);
            if !dispatcher.draw() {
                debug!("runtime gone before frame tick");
            }
        });
    }
}

/// Host that turns trees into something visible.
pub trait Renderer {
    /// Mounted root.
    type Node;

    /// Mount `tree`. The host posts user input through `dispatcher`.
    fn render(&mut self, dispatcher: &Dispatcher, tree: &Tree) -> Result<Self::Node, RuntimeError>;

    /// Changes that turn `old` into `new`.
    fn diff(&self, old: &Tree, new: &Tree) -> Patch {
        tree::diff(old, new)
    }

    fn patch(&mut self, root: Self::Node, patch: &Patch) -> Result<Self::Node, RuntimeError>;
}

/// Pure model transition plus follow-up actions.
pub type Reducer = fn(&Model, Action) -> (Model, Vec<Action>);

/// Outcome of handling one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct Runtime<R: Renderer, S: FrameScheduler = TimerScheduler> {
    model: Model,
    reducer: Reducer,
    tree: Tree,
    root: Option<R::Node>,
    pending: VecDeque<Action>,
    render_request: RenderRequest,
    renderer: R,
    scheduler: S,
    frame_interval: Duration,
    mailbox: Receiver<RuntimeMessage>,
    dispatcher: Dispatcher,
}

impl<R: Renderer> Runtime<R, TimerScheduler> {
    pub fn new(renderer: R, config: &RuntimeConfig) -> Self {
        Self::with_scheduler(renderer, TimerScheduler, config)
    }
}

impl<R: Renderer, S: FrameScheduler> Runtime<R, S> {
    pub fn with_scheduler(renderer: R, scheduler: S, config: &RuntimeConfig) -> Self {
        let (sender, mailbox) = mpsc::sync_channel(config.mailbox_capacity);
        let model = Model::new();
        Runtime {
            tree: view(&model),
            model,
            reducer: update,
            root: None,
            pending: VecDeque::new(),
            render_request: RenderRequest::NoRequest,
            renderer,
            scheduler,
            frame_interval: config.frame_interval(),
            mailbox,
            dispatcher: Dispatcher { sender },
        }
    }

    /// Replace the game reducer.
    pub fn with_reducer(mut self, reducer: Reducer) -> Self {
        self.reducer = reducer;
        self
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Tree shown by the last frame.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn render_request(&self) -> RenderRequest {
        self.render_request
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Render the current tree once through the host.
    pub fn mount(&mut self) -> Result<(), RuntimeError> {
        let root = self.renderer.render(&self.dispatcher, &self.tree)?;
        self.root = Some(root);
        Ok(())
    }

    /// Mount, then process mailbox messages until `Stop`.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.mount()?;
        while let Ok(message) = self.mailbox.recv() {
            if self.handle(message)? == Flow::Stop {
                break;
            }
        }
        Ok(())
    }

    /// Process one message to completion.
    pub fn handle(&mut self, message: RuntimeMessage) -> Result<Flow, RuntimeError> {
        match message {
            RuntimeMessage::Message(action) => {
                self.reduce(action);
                if self.render_request == RenderRequest::NoRequest {
                    self.render_request = RenderRequest::InProgress;
                    self.scheduler
                        .schedule(self.dispatcher.clone(), self.frame_interval);
                }
                Ok(Flow::Continue)
            }
            RuntimeMessage::Draw => {
                self.draw()?;
                Ok(Flow::Continue)
            }
            RuntimeMessage::Stop => Ok(Flow::Stop),
        }
    }

    /// Run `action` and every follow-up it produces through the reducer.
    fn reduce(&mut self, action: Action) {
        self.pending.push_back(action);
        while let Some(action) = self.pending.pop_front() {
            let _span = debug_span!("connect_four.runtime.update", ?action).entered();
            let (model, effects) = (self.reducer)(&self.model, action);
            self.model = model;
            self.pending.extend(effects);
        }
    }

    fn draw(&mut self) -> Result<(), RuntimeError> {
        self.render_request = RenderRequest::NoRequest;
        let tree = view(&self.model);
        let patch = self.renderer.diff(&self.tree, &tree);
        debug!(ops = patch.len(), "draw");
        if let Some(root) = self.root.take() {
            self.root = Some(self.renderer.patch(root, &patch)?);
        }
        self.tree = tree;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::sync::{Arc, Mutex};

    use crate::game::{Color, GameStatus};

    /// Keeps the mounted tree and counts host calls.
    #[derive(Default)]
    struct RecordingRenderer {
        mounts: usize,
        diffs: Cell<usize>,
        patched: Arc<Mutex<Vec<Tree>>>,
    }

    impl Renderer for RecordingRenderer {
        type Node = Tree;

        fn render(&mut self, _: &Dispatcher, tree: &Tree) -> Result<Tree, RuntimeError> {
            self.mounts += 1;
            Ok(tree.clone())
        }

        fn diff(&self, old: &Tree, new: &Tree) -> Patch {
            self.diffs.set(self.diffs.get() + 1);
            tree::diff(old, new)
        }

        fn patch(&mut self, mut root: Tree, patch: &Patch) -> Result<Tree, RuntimeError> {
            tree::apply(&mut root, patch);
            self.patched.lock().unwrap().push(root.clone());
            Ok(root)
        }
    }

    /// Counts requested ticks without ever delivering them.
    #[derive(Default)]
    struct ManualScheduler {
        requested: Cell<usize>,
    }

    impl FrameScheduler for ManualScheduler {
        fn schedule(&self, _: Dispatcher, _: Duration) {
            self.requested.set(self.requested.get() + 1);
        }
    }

    fn runtime() -> Runtime<RecordingRenderer, ManualScheduler> {
        let mut runtime = Runtime::with_scheduler(
            RecordingRenderer::default(),
            ManualScheduler::default(),
            &RuntimeConfig::default(),
        );
        runtime.mount().unwrap();
        runtime
    }

    fn click(column: usize) -> RuntimeMessage {
        RuntimeMessage::Message(Action::ColumnClick(column))
    }

    #[test]
    fn test_mount_renders_initial_view() {
        let runtime = runtime();
        assert_eq!(runtime.renderer().mounts, 1);
        assert_eq!(runtime.tree(), &view(&Model::new()));
        assert_eq!(runtime.render_request(), RenderRequest::NoRequest);
    }

    #[test]
    fn test_action_updates_model_immediately() {
        let mut runtime = runtime();
        assert_eq!(runtime.handle(click(4)).unwrap(), Flow::Continue);
        assert_eq!(
            runtime.model().game_state().status(),
            GameStatus::Turn(Color::Black)
        );
        assert_eq!(runtime.render_request(), RenderRequest::InProgress);
        // nothing drawn until the tick
        assert!(runtime.renderer().patched.lock().unwrap().is_empty());
    }

    #[test]
    fn test_burst_of_actions_coalesces_into_one_frame() {
        let mut runtime = runtime();
        for n in 0..10 {
            runtime.handle(click(n % 7 + 1)).unwrap();
        }
        assert_eq!(runtime.scheduler.requested.get(), 1);

        runtime.handle(RuntimeMessage::Draw).unwrap();
        assert_eq!(runtime.renderer().diffs.get(), 1);
        let patched = runtime.renderer().patched.lock().unwrap().clone();
        assert_eq!(patched.len(), 1);
        assert_eq!(patched[0], view(runtime.model()));
        assert_eq!(runtime.render_request(), RenderRequest::NoRequest);
    }

    #[test]
    fn test_next_action_after_draw_schedules_again() {
        let mut runtime = runtime();
        runtime.handle(click(1)).unwrap();
        runtime.handle(RuntimeMessage::Draw).unwrap();
        runtime.handle(click(2)).unwrap();
        assert_eq!(runtime.scheduler.requested.get(), 2);
        assert_eq!(runtime.render_request(), RenderRequest::InProgress);
    }

    #[test]
    fn test_rejected_move_does_not_disturb_runtime() {
        let mut runtime = runtime();
        runtime.handle(click(9)).unwrap();
        assert_eq!(runtime.model(), &Model::new());
        assert_eq!(runtime.render_request(), RenderRequest::InProgress);

        runtime.handle(RuntimeMessage::Draw).unwrap();
        runtime.handle(click(1)).unwrap();
        assert_eq!(
            runtime.model().game_state().status(),
            GameStatus::Turn(Color::Black)
        );
    }

    /// Game reducer that answers every click in column 1 with a click in
    /// column 2.
    fn reply_in_column_two(model: &Model, action: Action) -> (Model, Vec<Action>) {
        let (model, mut effects) = update(model, action);
        if action == Action::ColumnClick(1) {
            effects.push(Action::ColumnClick(2));
        }
        (model, effects)
    }

    #[test]
    fn test_follow_ups_run_before_next_message() {
        let mut runtime = Runtime::with_scheduler(
            RecordingRenderer::default(),
            ManualScheduler::default(),
            &RuntimeConfig::default(),
        )
        .with_reducer(reply_in_column_two);
        let dispatcher = runtime.dispatcher();
        assert!(dispatcher.dispatch(Action::ColumnClick(1)));
        assert!(dispatcher.dispatch(Action::ColumnClick(3)));
        assert!(dispatcher.stop());

        runtime.run().unwrap();

        let board = runtime.model().game_state().game_board();
        assert_eq!(board.column(1).unwrap().get(0), Some(Color::Red));
        assert_eq!(board.column(2).unwrap().get(0), Some(Color::Black));
        assert_eq!(board.column(3).unwrap().get(0), Some(Color::Red));
        assert_eq!(
            runtime.model().game_state().status(),
            GameStatus::Turn(Color::Black)
        );
        // the follow-up shares the frame of the action that caused it
        assert_eq!(runtime.scheduler.requested.get(), 1);
    }

    #[test]
    fn test_stop_ends_loop() {
        let mut runtime = runtime();
        assert_eq!(runtime.handle(RuntimeMessage::Stop).unwrap(), Flow::Stop);
    }

    #[test]
    fn test_run_with_timer_draws_once_per_frame() {
        let config = RuntimeConfig {
            frames_per_second: 50,
            ..RuntimeConfig::default()
        };
        let renderer = RecordingRenderer::default();
        let patched = renderer.patched.clone();
        let mut runtime = Runtime::new(renderer, &config);
        let dispatcher = runtime.dispatcher();

        for column in [1, 2, 1, 2, 1, 2, 3, 3, 4, 4] {
            assert!(dispatcher.dispatch(Action::ColumnClick(column)));
        }
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(300));
            dispatcher.stop();
        });

        runtime.run().unwrap();
        stopper.join().unwrap();

        let patched = patched.lock().unwrap();
        assert_eq!(patched.len(), 1);
        assert_eq!(patched[0], view(runtime.model()));
        assert_eq!(runtime.render_request(), RenderRequest::NoRequest);
    }
}
