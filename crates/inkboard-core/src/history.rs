//! Snapshot-based undo/redo history.

use crate::elements::Element;
use std::sync::Arc;

/// An immutable copy of the element array.
pub type Snapshot = Arc<[Element]>;

/// Linear history of element-array snapshots with a cursor.
///
/// Starts with one empty snapshot. Pushing truncates everything after the
/// cursor; undo and redo only move the cursor.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(None)
    }
}

impl History {
    /// Create a history, optionally bounded to `limit` snapshots.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            snapshots: vec![Arc::from(Vec::new())],
            cursor: 0,
            limit: limit.map(|l| l.max(1)),
        }
    }

    /// Record a new snapshot after the cursor, dropping the redo future.
    pub fn push(&mut self, elements: &[Element]) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Arc::from(elements));
        self.cursor = self.snapshots.len() - 1;
        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
                self.cursor -= excess;
            }
        }
    }

    /// Step back; returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward; returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Snapshot {
        Arc::clone(&self.snapshots[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Back to a single empty snapshot.
    pub fn reset(&mut self) {
        self.snapshots = vec![Arc::from(Vec::new())];
        self.cursor = 0;
    }

    /// Replace the whole history with one baseline snapshot (used after loading).
    pub fn reset_to(&mut self, elements: &[Element]) {
        self.snapshots = vec![Arc::from(elements)];
        self.cursor = 0;
    }
}
