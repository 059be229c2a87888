use std::collections::VecDeque;

use bevy_ecs::resource::Resource;
use serde::Serialize;

use crate::model::ResolutionTone;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEntry {
    pub id: String,
    pub tone: ResolutionTone,
    pub line: String,
    /// World tick the line was posted on.
    pub tick: u64,
}

/// Most recent narrative lines, newest first, bounded by `capacity`.
#[derive(Resource, Debug, Clone)]
pub struct StreetWire {
    entries: VecDeque<WireEntry>,
    capacity: usize,
}

impl StreetWire {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn post(&mut self, entry: WireEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> impl Iterator<Item = &WireEntry> {
        self.entries.iter()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for StreetWire {
    fn default() -> Self {
        Self::new(16)
    }
}
