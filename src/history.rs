//! Local undo/redo over the element store.
//!
//! The log records [`Action`]s — full element snapshots tagged add or
//! delete — in two push-only stacks. Actions are local bookkeeping and are
//! never transmitted; remote edits bypass the log entirely. Pushing a new
//! action invalidates redo (classic linear history).

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::element::Element;
use crate::store::ElementStore;

/// What a recorded action did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Add,
    Delete,
}

/// A locally reversible operation: the kind plus the element snapshot taken
/// the moment the edit completed.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub element: Element,
}

impl Action {
    /// Record that `element` was added.
    #[must_use]
    pub fn add(element: Element) -> Self {
        Self { kind: ActionKind::Add, element }
    }

    /// Record that `element` was deleted.
    #[must_use]
    pub fn delete(element: Element) -> Self {
        Self { kind: ActionKind::Delete, element }
    }
}

/// Undo and redo stacks over [`Action`] values.
#[derive(Debug, Default)]
pub struct ActionLog {
    undo: Vec<Action>,
    redo: Vec<Action>,
}

impl ActionLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed local edit. Clears the redo stack.
    pub fn push(&mut self, action: Action) {
        self.redo.clear();
        self.undo.push(action);
    }

    /// Whether there is anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is anything to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Undo the most recent action against `store`.
    ///
    /// The inverse of an add is remove-by-id; the inverse of a delete is
    /// re-upserting the stored snapshot. Returns the action that was undone
    /// so the caller can broadcast the inverse, or `None` if the stack was
    /// empty. An inverse targeting a since-removed id is a silent no-op in
    /// the store, but still moves between stacks.
    pub fn undo(&mut self, store: &mut ElementStore) -> Option<Action> {
        let action = self.undo.pop()?;
        match action.kind {
            ActionKind::Add => {
                store.remove(&action.element.element_id);
            }
            ActionKind::Delete => {
                store.upsert(action.element.clone());
            }
        }
        self.redo.push(action.clone());
        Some(action)
    }

    /// Re-apply the most recently undone action against `store`.
    ///
    /// Returns the action that was re-applied, or `None` if there was
    /// nothing to redo.
    pub fn redo(&mut self, store: &mut ElementStore) -> Option<Action> {
        let action = self.redo.pop()?;
        match action.kind {
            ActionKind::Add => {
                store.upsert(action.element.clone());
            }
            ActionKind::Delete => {
                store.remove(&action.element.element_id);
            }
        }
        self.undo.push(action.clone());
        Some(action)
    }
}
