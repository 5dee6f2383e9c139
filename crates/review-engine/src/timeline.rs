//! Append-only board-snapshot history addressed by move index.
//!
//! Slot 0 holds the position before any move; slot k+1 the position after
//! move k. Positions are addressed by integer index only, never by
//! reference, which makes "restore to saved index" safe across branch
//! resets. A move index of -1 means "before the first move" and converts to
//! a slot via `index + 1`.

use chess_core::error::CoreError;
use chess_core::game_data::GameData;
use chess_core::position::{PlayedMove, Position};

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    positions: Vec<Position>,
    moves: Vec<PlayedMove>,
}

impl Timeline {
    /// An empty timeline, as the exploring branch starts out.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A timeline holding only its starting position.
    pub fn new(start: Position) -> Self {
        Self {
            positions: vec![start],
            moves: Vec::new(),
        }
    }

    /// Replay a loaded game from the standard start position.
    pub fn from_game(game: &GameData) -> Result<Self, CoreError> {
        let mut board = Position::default();
        let mut timeline = Timeline::new(board);
        for san in &game.moves {
            let played = board.apply_san(san)?;
            timeline.push(board, played);
        }
        Ok(timeline)
    }

    /// Drop everything and restart from a new base position.
    pub fn reset(&mut self, start: Position) {
        self.positions.clear();
        self.moves.clear();
        self.positions.push(start);
    }

    /// Drop everything, leaving the timeline empty (inactive branch).
    pub fn clear(&mut self) {
        self.positions.clear();
        self.moves.clear();
    }

    /// Append the position reached by `played`.
    pub fn push(&mut self, position: Position, played: PlayedMove) {
        self.positions.push(position);
        self.moves.push(played);
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Last valid move index, -1 when the timeline has no moves.
    pub fn last_index(&self) -> i32 {
        self.moves.len() as i32 - 1
    }

    /// Whether `index` addresses a slot, counting -1 as "before any move".
    pub fn in_bounds(&self, index: i32) -> bool {
        index >= -1 && index < self.moves.len() as i32
    }

    /// Position at a move index (-1 = starting position).
    pub fn position_at(&self, index: i32) -> Option<Position> {
        if index < -1 {
            return None;
        }
        self.positions.get((index + 1) as usize).copied()
    }

    /// The move that produced slot `index + 1`. None at -1.
    pub fn move_at(&self, index: i32) -> Option<&PlayedMove> {
        if index < 0 {
            return None;
        }
        self.moves.get(index as usize)
    }

    /// Starting position (slot 0).
    pub fn start_position(&self) -> Position {
        self.positions.first().copied().unwrap_or_default()
    }

    /// UCI tokens of every recorded move, in order.
    pub fn uci_moves(&self) -> Vec<String> {
        self.moves.iter().map(|m| m.uci.clone()).collect()
    }

    /// Structural invariant: one more position than moves, or fully empty
    /// while the branch is inactive.
    pub fn is_consistent(&self) -> bool {
        self.positions.len() == self.moves.len() + 1
            || (self.positions.is_empty() && self.moves.is_empty())
    }
}
