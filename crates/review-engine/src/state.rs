//! Shared UI snapshot and its transactional store.

use std::sync::{Mutex, PoisonError};

use chess_core::position::Position;

use crate::stage::Stage;

/// Exploring-branch sub-record. `saved_game_move_index` is meaningful only
/// while `is_exploring_line` is true; it is the main-timeline index restored
/// on return to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploringState {
    pub is_exploring_line: bool,
    /// UCI tokens of the exploring line, in order.
    pub moves: Vec<String>,
    pub move_index: i32,
    pub saved_game_move_index: i32,
}

impl Default for ExploringState {
    fn default() -> Self {
        Self {
            is_exploring_line: false,
            moves: Vec::new(),
            move_index: -1,
            saved_game_move_index: -1,
        }
    }
}

/// The snapshot every navigation operation reads and transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewState {
    /// Board currently shown.
    pub board: Position,
    /// Main-timeline move index (-1 = before the first move). Untouched
    /// while an exploring branch is active.
    pub move_index: i32,
    pub stage: Stage,
    /// Display orientation; no timeline or analysis interaction.
    pub flipped: bool,
    pub exploring: ExploringState,
}

impl ReviewState {
    /// State for a freshly loaded game: before the first move, previewing.
    pub fn at_start(board: Position) -> Self {
        Self {
            board,
            move_index: -1,
            stage: Stage::Preview,
            flipped: false,
            exploring: ExploringState::default(),
        }
    }
}

/// Single mutable cell holding the snapshot. Exposes only clone-out reads
/// and closure-based updates, so no caller can observe a snapshot mid-update.
#[derive(Debug)]
pub struct SnapshotStore {
    inner: Mutex<ReviewState>,
}

impl SnapshotStore {
    pub fn new(initial: ReviewState) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    /// Atomic read: a full copy of the current snapshot.
    pub fn read(&self) -> ReviewState {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Atomic read-transform-write. The closure runs under the lock; keep it
    /// free of I/O.
    pub fn update<R>(&self, f: impl FnOnce(&mut ReviewState) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_is_a_copy() {
        let store = SnapshotStore::new(ReviewState::at_start(Position::default()));
        let mut copy = store.read();
        copy.move_index = 5;
        assert_eq!(store.read().move_index, -1);
    }

    #[test]
    fn test_update_is_transactional() {
        let store = SnapshotStore::new(ReviewState::at_start(Position::default()));
        let previous = store.update(|s| {
            let was = s.stage;
            s.stage = Stage::Manual;
            s.move_index = 2;
            was
        });
        assert_eq!(previous, Stage::Preview);
        let state = store.read();
        assert_eq!(state.stage, Stage::Manual);
        assert_eq!(state.move_index, 2);
    }
}
