//! The move-navigation engine.
//!
//! Every public operation is synchronous and runs to completion against a
//! consistent snapshot. Misuse (rapid taps at boundaries, drags to illegal
//! squares, out-of-range indices) is expected and silently refused: no
//! mutation, no signal. Analysis requests are fire-and-forget; a fast
//! sequence of steps relies on the trigger's token fencing so that only the
//! final position's results are applied.

use std::sync::Arc;

use chess::{Piece, Square};
use tracing::{debug, info};

use chess_core::game_data::GameData;
use chess_core::position::Position;

use crate::config::ReviewConfig;
use crate::error::EngineError;
use crate::sound::SoundPlayer;
use crate::stage::{Gate, Stage};
use crate::state::{ExploringState, ReviewState, SnapshotStore};
use crate::timeline::Timeline;
use crate::trigger::{AnalysisTrigger, SoundTrigger};

pub struct Navigator<A, S> {
    store: Arc<SnapshotStore>,
    main: Timeline,
    exploring: Timeline,
    analysis: A,
    sounds: SoundPlayer<S>,
}

impl<A: AnalysisTrigger, S: SoundTrigger> Navigator<A, S> {
    /// Build the engine for a loaded game. The main timeline is replayed
    /// once from the game's SAN moves and never grows afterwards; the
    /// exploring timeline starts empty.
    pub fn new(
        game: &GameData,
        config: &ReviewConfig,
        analysis: A,
        sounds: S,
    ) -> Result<Self, EngineError> {
        let main = Timeline::from_game(game)?;
        let store = Arc::new(SnapshotStore::new(ReviewState::at_start(
            main.start_position(),
        )));
        info!(moves = main.move_count(), "game loaded");
        Ok(Self {
            store,
            main,
            exploring: Timeline::empty(),
            analysis,
            sounds: SoundPlayer::new(sounds, config.move_sounds_enabled),
        })
    }

    /// Handle to the shared snapshot, for the UI and the orchestrator.
    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    pub fn snapshot(&self) -> ReviewState {
        self.store.read()
    }

    pub fn main_timeline(&self) -> &Timeline {
        &self.main
    }

    pub fn exploring_timeline(&self) -> &Timeline {
        &self.exploring
    }

    /// Stage transitions are owned by the outer orchestrator (auto-preview,
    /// bulk analysis); it drives them through here.
    pub fn set_stage(&self, stage: Stage) {
        self.store.update(|s| s.stage = stage);
    }

    /// Whether navigation controls should be enabled. Purely advisory.
    pub fn can_navigate(&self) -> bool {
        self.store.read().stage.allows_navigation()
    }

    /// The Analyse -> Manual escape hatch: anchor Manual at the current
    /// position and re-key analysis to the anchored move index.
    pub fn enter_manual_stage_at_current_position(&mut self) {
        let index = self.store.update(|s| {
            s.stage = Stage::Manual;
            s.move_index
        });
        info!(index, "entered manual stage at current position");
        self.analysis.restart_at_move(index);
    }

    /// Gate a navigation request against the current stage. Returns true if
    /// the request may proceed.
    fn interrupt_gate(&mut self) -> bool {
        match self.store.read().stage.gate() {
            Gate::Refused => {
                debug!("navigation refused during preview");
                false
            }
            Gate::Interrupted => {
                // The forced transition repositions the view; the request
                // that caused it is dropped.
                self.enter_manual_stage_at_current_position();
                false
            }
            Gate::Allowed => true,
        }
    }

    /// Jump to the position before any move of the active branch.
    pub fn go_to_start(&mut self) {
        if !self.interrupt_gate() {
            return;
        }
        self.jump(-1);
    }

    /// Jump to the last move of the active branch. With no moves to jump to,
    /// re-issues analysis of the current board without changing the index.
    pub fn go_to_end(&mut self) {
        if !self.interrupt_gate() {
            return;
        }
        let state = self.store.read();
        let timeline = self.active_timeline(&state);
        if timeline.move_count() == 0 {
            self.analysis.analyze_position(&state.board);
            return;
        }
        let last = timeline.last_index();
        self.jump(last);
    }

    /// Jump to an arbitrary move index of the active branch. Out-of-range
    /// indices are silently ignored. The sound cue comes from the move AT
    /// the target index, not the move being left behind.
    pub fn go_to_move(&mut self, index: i32) {
        if !self.interrupt_gate() {
            return;
        }
        let state = self.store.read();
        let exploring = state.exploring.is_exploring_line;
        let timeline = self.active_timeline(&state);
        let Some(position) = timeline.position_at(index) else {
            debug!(index, "go_to_move out of range");
            return;
        };
        let played = timeline.move_at(index).cloned();

        self.store.update(|s| {
            s.board = position;
            if exploring {
                s.exploring.move_index = index;
            } else {
                s.move_index = index;
            }
        });
        self.sounds.play(played.as_ref());
        if exploring {
            // Exploring positions are transient ad-hoc queries, not part of
            // the cached main-game analysis
            self.analysis.restart_exploring_line();
        } else {
            self.analysis.analyze_position(&position);
        }
    }

    /// Reposition to `index` on the active branch without a sound cue, then
    /// request analysis of the new position. Used by the start/end jumps.
    fn jump(&mut self, index: i32) {
        let state = self.store.read();
        let exploring = state.exploring.is_exploring_line;
        let timeline = self.active_timeline(&state);
        let Some(position) = timeline.position_at(index) else {
            return;
        };
        self.store.update(|s| {
            s.board = position;
            if exploring {
                s.exploring.move_index = index;
            } else {
                s.move_index = index;
            }
        });
        self.analysis.analyze_position(&position);
    }

    /// Step one move forward. No-op at the last index.
    pub fn next_move(&mut self) {
        self.step(1);
    }

    /// Step one move back. No-op at index -1.
    pub fn prev_move(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: i32) {
        if !self.interrupt_gate() {
            return;
        }
        let state = self.store.read();
        let exploring = state.exploring.is_exploring_line;
        let current = if exploring {
            state.exploring.move_index
        } else {
            state.move_index
        };
        let target = current + delta;
        let timeline = self.active_timeline(&state);
        let Some(position) = timeline.position_at(target) else {
            return;
        };
        let played = timeline.move_at(target).cloned();

        self.store.update(|s| {
            s.board = position;
            if exploring {
                s.exploring.move_index = target;
            } else {
                s.move_index = target;
            }
        });
        self.sounds.play(played.as_ref());
        if exploring {
            self.analysis.restart_exploring_line();
        } else {
            // Manual-stage main-game analysis is keyed by move index so
            // incremental results can be reused
            self.analysis.restart_at_move(target);
        }
    }

    /// Open (or replace) the exploring branch from a space-separated UCI
    /// move sequence, replaying as much of it as is legal. The valid prefix
    /// is accepted; the rest of a partially-illegal line is silently
    /// dropped. `start_index` is clamped to the replayed prefix.
    pub fn explore_line(&mut self, pv: &str, start_index: i32) {
        if !self.interrupt_gate() {
            return;
        }
        if pv.trim().is_empty() {
            return;
        }

        let state = self.store.read();
        let saved_index = state.move_index;
        let start_board = state.board;

        self.exploring.reset(start_board);
        let mut board = start_board;
        for token in pv.split_whitespace() {
            match board.apply_uci(token) {
                Some(played) => self.exploring.push(board, played),
                None => {
                    debug!(token, "exploring line truncated at first illegal token");
                    break;
                }
            }
        }

        let clamped = start_index.clamp(-1, self.exploring.last_index());
        let Some(position) = self.exploring.position_at(clamped) else {
            return;
        };
        let moves = self.exploring.uci_moves();
        debug!(
            replayed = moves.len(),
            index = clamped,
            "exploring line opened"
        );

        self.store.update(|s| {
            s.board = position;
            s.exploring = ExploringState {
                is_exploring_line: true,
                moves,
                move_index: clamped,
                saved_game_move_index: saved_index,
            };
        });
        // Full reset: exploring positions are not assumed cached
        self.analysis.restart_exploring_line();
    }

    /// Leave the exploring branch and return to the main game at the index
    /// saved when the branch was opened (falling back to the initial
    /// position if that index no longer resolves).
    pub fn back_to_original_game(&mut self) {
        if !self.interrupt_gate() {
            return;
        }
        let state = self.store.read();
        if !state.exploring.is_exploring_line {
            return;
        }
        let saved = state.exploring.saved_game_move_index;

        self.exploring.clear();
        let (index, position) = match self.main.position_at(saved) {
            Some(p) => (saved, p),
            None => (-1, self.main.start_position()),
        };
        debug!(index, "returned to original game");

        self.store.update(|s| {
            s.exploring = ExploringState::default();
            s.board = position;
            s.move_index = index;
        });
        // Used here as a generic "re-synchronize analysis" signal
        self.analysis.restart_exploring_line();
    }

    /// Toggle display orientation. Permitted in every stage.
    pub fn flip_board(&mut self) {
        self.store.update(|s| s.flipped = !s.flipped);
    }

    /// Play a user move (drag-and-drop or click) on the current board.
    /// Permitted only in Manual stage, with no gate escalation. Pawn
    /// promotions always become queens; there is no underpromotion path in
    /// this layer.
    pub fn make_manual_move(&mut self, from: Square, to: Square) {
        let state = self.store.read();
        match state.stage {
            Stage::Manual => {}
            Stage::Preview | Stage::Analyse => return,
        }

        let old_board = state.board;
        if !old_board.is_legal_move(from, to) {
            debug!(%from, %to, "illegal manual move refused");
            return;
        }
        let promotion = if old_board.needs_promotion(from, to) {
            Some(Piece::Queen)
        } else {
            None
        };
        let mut new_board = old_board;
        let Some(played) = new_board.apply_move(from, to, promotion) else {
            return;
        };
        let uci = played.uci.clone();
        debug!(uci = %uci, "manual move played");

        if state.exploring.is_exploring_line {
            self.exploring.push(new_board, played);
            self.store.update(|s| {
                s.board = new_board;
                s.exploring.moves.push(uci);
                s.exploring.move_index += 1;
            });
        } else {
            // First manual move opens a one-move exploring branch, exactly
            // as explore_line would
            self.exploring.reset(old_board);
            self.exploring.push(new_board, played);
            self.store.update(|s| {
                s.board = new_board;
                s.exploring = ExploringState {
                    is_exploring_line: true,
                    moves: vec![uci],
                    move_index: 0,
                    saved_game_move_index: s.move_index,
                };
            });
        }
        self.analysis.restart_exploring_line();
    }

    fn active_timeline(&self, state: &ReviewState) -> &Timeline {
        if state.exploring.is_exploring_line {
            &self.exploring
        } else {
            &self.main
        }
    }
}
