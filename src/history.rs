//! Bounded undo history.
//!
//! A strict LIFO stack of buffer snapshots with FIFO eviction at the capacity
//! bound: pushing beyond the bound drops the single oldest entry, preserving
//! the relative order of the rest.

use std::collections::VecDeque;

use crate::buffer::Snapshot;
use crate::config::HISTORY_CAPACITY;

pub struct HistoryStack {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl HistoryStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a snapshot, evicting the oldest entry if the bound would be
    /// exceeded.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// Remove and return the most recently pushed snapshot, or `None` when
    /// there is nothing left to undo.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
