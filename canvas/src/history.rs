//! Edit history: a linear undo/redo stack of full-surface snapshots.
//!
//! DESIGN
//! ======
//! Every snapshot is a complete serialized `SurfaceDocument`, not a diff. The
//! stack holds one baseline (the surface as initialized or loaded) followed by
//! at most `MAX_HISTORY` edit snapshots. The cursor points at the snapshot
//! that matches the live surface; cursor 0 is the baseline.
//!
//! Recording after an undo drops every snapshot past the cursor, so the
//! abandoned redo branch can never be reached again. Once the cap is
//! exceeded the oldest edit is promoted to baseline and the state before it
//! is gone.
//!
//! Replay runs in the `Replaying` state. Any `record` issued while replaying
//! (the replay's own add/remove notifications) is refused, which keeps undo
//! from writing itself into the history it is walking.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::consts::MAX_HISTORY;

/// Phase of the history tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryState {
    /// Accepting new snapshots.
    #[default]
    Idle,
    /// Appending a snapshot (truncate, push, evict).
    Recording,
    /// A snapshot is being restored onto the surface; `from` is the cursor
    /// before the move, used to roll back if the restore fails.
    Replaying { from: usize },
}

/// Bounded linear undo/redo stack.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<String>,
    cursor: usize,
    state: HistoryState,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Empty history retaining up to `MAX_HISTORY` edits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    /// Empty history retaining up to `capacity` edits (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { snapshots: VecDeque::new(), cursor: 0, state: HistoryState::Idle, capacity: capacity.max(1) }
    }

    /// Drop everything and start over from `baseline`.
    pub fn reset(&mut self, baseline: String) {
        self.snapshots.clear();
        self.snapshots.push_back(baseline);
        self.cursor = 0;
        self.state = HistoryState::Idle;
    }

    /// Drop everything, including the baseline.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
        self.state = HistoryState::Idle;
    }

    /// Record the surface state after an edit.
    ///
    /// Returns false (and records nothing) unless the tracker is idle. The
    /// first snapshot recorded into an empty history becomes the baseline.
    pub fn record(&mut self, snapshot: String) -> bool {
        if self.state != HistoryState::Idle {
            return false;
        }
        if self.snapshots.is_empty() {
            self.reset(snapshot);
            return true;
        }

        self.state = HistoryState::Recording;
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(snapshot);
        self.cursor += 1;
        while self.snapshots.len() > self.capacity + 1 {
            self.snapshots.pop_front();
            self.cursor -= 1;
        }
        self.state = HistoryState::Idle;
        true
    }

    /// Step the cursor back and return the snapshot to restore.
    ///
    /// Enters `Replaying`; the caller must follow up with [`History::finish_replay`].
    /// Returns `None` at the baseline or if a replay is already in progress.
    pub fn begin_undo(&mut self) -> Option<String> {
        if !self.can_undo() {
            return None;
        }
        self.begin_replay(self.cursor - 1)
    }

    /// Step the cursor forward and return the snapshot to restore.
    ///
    /// Enters `Replaying`; the caller must follow up with [`History::finish_replay`].
    /// Returns `None` at the newest snapshot or if a replay is already in progress.
    pub fn begin_redo(&mut self) -> Option<String> {
        if !self.can_redo() {
            return None;
        }
        self.begin_replay(self.cursor + 1)
    }

    fn begin_replay(&mut self, target: usize) -> Option<String> {
        let snapshot = self.snapshots.get(target)?.clone();
        self.state = HistoryState::Replaying { from: self.cursor };
        self.cursor = target;
        Some(snapshot)
    }

    /// Leave `Replaying`. When `applied` is false the cursor returns to where it was.
    pub fn finish_replay(&mut self, applied: bool) {
        if let HistoryState::Replaying { from } = self.state {
            if !applied {
                self.cursor = from;
            }
        }
        self.state = HistoryState::Idle;
    }

    #[must_use]
    pub fn state(&self) -> HistoryState {
        self.state
    }

    #[must_use]
    pub fn is_replaying(&self) -> bool {
        matches!(self.state, HistoryState::Replaying { .. })
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.state == HistoryState::Idle && self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.state == HistoryState::Idle && self.cursor + 1 < self.snapshots.len()
    }

    /// Number of retained edit snapshots, excluding the baseline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Snapshot matching the live surface, if any has been recorded.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.snapshots.get(self.cursor).map(String::as_str)
    }
}
