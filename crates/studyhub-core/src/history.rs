//! Board state with bounded undo/redo history.
//!
//! Every transition consumes the current [`BoardState`] and returns the next one.
//! [`BoardState::dispatch`] wraps that for callers holding the state in place.

use crate::scene::Scene;
use crate::shapes::{Shape, Stroke, TextAnnotation};
use std::collections::VecDeque;

/// Maximum number of snapshots kept in either direction.
pub const UNDO_LIMIT: usize = 80;

/// Scene snapshots for undo (`past`, oldest first) and redo (`future`, next first).
#[derive(Debug, Clone, Default)]
pub struct History {
    past: VecDeque<Scene>,
    future: VecDeque<Scene>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots available to undo, oldest first.
    pub fn past(&self) -> &VecDeque<Scene> {
        &self.past
    }

    /// Snapshots available to redo, next first.
    pub fn future(&self) -> &VecDeque<Scene> {
        &self.future
    }

    /// Push onto `past`, evicting the oldest snapshot at the limit.
    fn push_past(&mut self, snapshot: Scene) {
        if self.past.len() >= UNDO_LIMIT {
            self.past.pop_front();
        }
        self.past.push_back(snapshot);
    }

    /// Push onto the front of `future`, evicting from the tail at the limit.
    fn push_future(&mut self, snapshot: Scene) {
        if self.future.len() >= UNDO_LIMIT {
            self.future.pop_back();
        }
        self.future.push_front(snapshot);
    }
}

/// A transition of the board state.
#[derive(Debug, Clone)]
pub enum BoardAction {
    CommitStroke(Stroke),
    CommitShape(Shape),
    CommitText(TextAnnotation),
    Undo,
    Redo,
    Clear,
    /// Replace the scene with a restored one and drop all history.
    Load(Scene),
}

/// The committed scene plus its history.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    scene: Scene,
    history: History,
}

impl BoardState {
    /// An empty board with no history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.history.future.is_empty()
    }

    /// Apply an action, returning the next state.
    pub fn apply(self, action: BoardAction) -> Self {
        match action {
            BoardAction::CommitStroke(stroke) => self.commit_stroke(stroke),
            BoardAction::CommitShape(shape) => self.commit_shape(shape),
            BoardAction::CommitText(text) => self.commit_text(text),
            BoardAction::Undo => self.undo(),
            BoardAction::Redo => self.redo(),
            BoardAction::Clear => self.clear(),
            BoardAction::Load(scene) => Self {
                scene,
                history: History::new(),
            },
        }
    }

    /// Apply an action in place.
    pub fn dispatch(&mut self, action: BoardAction) {
        let state = std::mem::take(self);
        *self = state.apply(action);
    }

    pub fn commit_stroke(self, stroke: Stroke) -> Self {
        self.commit(|scene| scene.with_stroke(stroke))
    }

    pub fn commit_shape(self, shape: Shape) -> Self {
        self.commit(|scene| scene.with_shape(shape))
    }

    pub fn commit_text(self, text: TextAnnotation) -> Self {
        self.commit(|scene| scene.with_text(text))
    }

    /// Snapshot the current scene, apply `append`, and discard the redo branch.
    fn commit(mut self, append: impl FnOnce(Scene) -> Scene) -> Self {
        self.history.push_past(self.scene.clone());
        self.history.future.clear();
        self.scene = append(self.scene);
        self
    }

    /// Restore the most recent snapshot. No-op when there is nothing to undo.
    pub fn undo(mut self) -> Self {
        let Some(previous) = self.history.past.pop_back() else {
            return self;
        };
        let current = std::mem::replace(&mut self.scene, previous);
        self.history.push_future(current);
        self
    }

    /// Re-apply the next undone snapshot. No-op when there is nothing to redo.
    pub fn redo(mut self) -> Self {
        let Some(next) = self.history.future.pop_front() else {
            return self;
        };
        let current = std::mem::replace(&mut self.scene, next);
        self.history.push_past(current);
        self
    }

    /// Empty the scene, keeping the previous content undoable.
    pub fn clear(mut self) -> Self {
        let current = std::mem::take(&mut self.scene);
        self.history.push_past(current);
        self.history.future.clear();
        self
    }
}
