//! Verb action queue between the slot layer (producer) and the world
//! (consumer).
//!
//! The world never drains destructively: it peeks, resolves, and only then
//! acknowledges the ids it resolved. Anything enqueued in between survives.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::model::VerbAction;

/// FIFO of pending verb actions.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    pending: VecDeque<VerbAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, action: VerbAction) {
        self.pending.push_back(action);
    }

    /// Remove and return everything, oldest first.
    pub fn dequeue_all(&mut self) -> Vec<VerbAction> {
        self.pending.drain(..).collect()
    }

    /// Copy everything, oldest first, without removing it.
    pub fn peek_all(&self) -> Vec<VerbAction> {
        self.pending.iter().cloned().collect()
    }

    /// Remove only the actions whose ids are listed. Returns how many went.
    pub fn acknowledge<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let ids: BTreeSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        let before = self.pending.len();
        self.pending.retain(|action| !ids.contains(action.id.as_str()));
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Cloneable, thread-safe handle to one `ActionQueue`. Every operation takes
/// the lock once, so a drain is a single atomic pull.
#[derive(Debug, Clone, Default)]
pub struct SharedActionQueue {
    inner: Arc<Mutex<ActionQueue>>,
}

impl SharedActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, action: VerbAction) {
        self.inner.lock().enqueue(action);
    }

    pub fn dequeue_all(&self) -> Vec<VerbAction> {
        self.inner.lock().dequeue_all()
    }

    pub fn peek_all(&self) -> Vec<VerbAction> {
        self.inner.lock().peek_all()
    }

    pub fn acknowledge<S: AsRef<str>>(&self, ids: &[S]) -> usize {
        self.inner.lock().acknowledge(ids)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
