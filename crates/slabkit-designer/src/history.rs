//! Undo/Redo history
//!
//! Whole-project snapshot stack. Each entry is a full serialized copy of
//! the project; undo and redo move a cursor and hand back the snapshot to
//! restore. Consecutive identical snapshots are stored once, and the
//! oldest entries are dropped past the depth limit.

use crate::serialization::Snapshot;

/// Default number of snapshots kept.
pub const HISTORY_MAX: usize = 50;

/// Snapshot-based undo/redo stack.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    stack: Vec<Snapshot>,
    /// Position of the current state in `stack`; meaningless when empty.
    index: usize,
    max_depth: usize,
    quiet: bool,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(HISTORY_MAX)
    }
}

impl SnapshotHistory {
    /// Create a history keeping at most `max_depth` snapshots (at least 1).
    pub fn new(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            index: 0,
            max_depth: max_depth.max(1),
            quiet: false,
        }
    }

    /// Record a new state.
    ///
    /// Returns false when nothing was stored: the history is quiet (a
    /// restore is in progress) or the snapshot equals the current entry.
    /// Any redo entries are discarded.
    pub fn push(&mut self, snapshot: Snapshot) -> bool {
        if self.quiet {
            return false;
        }
        if self.current() == Some(&snapshot) {
            return false;
        }
        if !self.stack.is_empty() {
            self.stack.truncate(self.index + 1);
        }
        self.stack.push(snapshot);
        if self.stack.len() > self.max_depth {
            let excess = self.stack.len() - self.max_depth;
            self.stack.drain(..excess);
        }
        self.index = self.stack.len() - 1;
        tracing::debug!(index = self.index, len = self.stack.len(), "history push");
        true
    }

    /// Step back. Returns the snapshot to restore, or `None` at the bottom.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        tracing::debug!(index = self.index, "history undo");
        self.stack.get(self.index)
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the top.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        tracing::debug!(index = self.index, "history redo");
        self.stack.get(self.index)
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.stack.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty() && self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.stack.len()
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        if self.stack.is_empty() {
            0
        } else {
            self.index
        }
    }

    /// Number of redo steps available.
    pub fn redo_depth(&self) -> usize {
        self.stack.len().saturating_sub(self.index + 1)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Suppress pushes while a snapshot is being applied.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.index = 0;
    }

    /// Drop everything and start over from `snapshot`.
    pub fn reset_to(&mut self, snapshot: Snapshot) {
        self.clear();
        let quiet = self.quiet;
        self.quiet = false;
        self.push(snapshot);
        self.quiet = quiet;
    }
}
