//! Integration tests: navigation over a real loaded game.
//!
//! Exercises the documented navigation properties end to end: timeline
//! invariants, index bounds, idempotence, the explore/return round-trip,
//! boundary no-ops, prefix clamping and stage gating.

mod common;

use chess::Square;
use common::{manual_session, opera_game, RecordingAnalysis, RecordingSounds};
use review_engine::{Navigator, Stage};

fn assert_invariants(navigator: &Navigator<RecordingAnalysis, RecordingSounds>) {
    assert!(navigator.main_timeline().is_consistent());
    assert!(navigator.exploring_timeline().is_consistent());

    let state = navigator.snapshot();
    if state.exploring.is_exploring_line {
        assert!(state.exploring.move_index >= -1);
        assert!(state.exploring.move_index < state.exploring.moves.len() as i32);
        assert_eq!(
            navigator.exploring_timeline().move_count(),
            state.exploring.moves.len()
        );
    }
    assert!(state.move_index >= -1);
    assert!(state.move_index <= navigator.main_timeline().last_index());
}

#[test]
fn invariants_hold_across_a_whole_session() {
    let game = opera_game();
    let mut s = manual_session(&game);

    s.navigator.go_to_end();
    assert_invariants(&s.navigator);
    s.navigator.go_to_move(10);
    assert_invariants(&s.navigator);
    s.navigator.explore_line("d8d7 b5d7", 1);
    assert_invariants(&s.navigator);
    s.navigator.prev_move();
    assert_invariants(&s.navigator);
    s.navigator.make_manual_move(Square::G8, Square::E7);
    assert_invariants(&s.navigator);
    s.navigator.back_to_original_game();
    assert_invariants(&s.navigator);
    s.navigator.go_to_start();
    assert_invariants(&s.navigator);
}

#[test]
fn go_to_start_twice_equals_once() {
    let game = opera_game();
    let mut s = manual_session(&game);

    s.navigator.go_to_move(7);
    s.navigator.go_to_start();
    let once = s.navigator.snapshot();
    s.navigator.go_to_start();
    assert_eq!(s.navigator.snapshot(), once);
}

#[test]
fn explore_and_return_round_trip() {
    let game = opera_game();
    let mut s = manual_session(&game);

    s.navigator.go_to_move(20);
    let before = s.navigator.snapshot();

    // A suggested continuation after 11. Bxb5+: block with the other knight
    s.navigator.explore_line("b8d7 e1c1", 1);
    assert!(s.navigator.snapshot().exploring.is_exploring_line);

    s.navigator.back_to_original_game();
    let restored = s.navigator.snapshot();
    assert_eq!(restored.board, before.board);
    assert_eq!(restored.move_index, before.move_index);
    assert!(!restored.exploring.is_exploring_line);
    assert!(restored.exploring.moves.is_empty());
}

#[test]
fn boundary_steps_are_noops() {
    let game = opera_game();
    let mut s = manual_session(&game);

    s.navigator.prev_move();
    assert_eq!(s.navigator.snapshot().move_index, -1);
    assert!(s.analysis.calls().is_empty());

    s.navigator.go_to_end();
    let end = s.navigator.snapshot();
    assert_eq!(end.move_index, game.moves.len() as i32 - 1);
    s.navigator.next_move();
    assert_eq!(s.navigator.snapshot(), end);
}

#[test]
fn explore_line_clamps_to_replayed_prefix() {
    let game = opera_game();
    let mut s = manual_session(&game);

    s.navigator.explore_line("e2e4 e7e5 illegaltoken g1f3", 10);

    let state = s.navigator.snapshot();
    assert_eq!(state.exploring.moves, vec!["e2e4", "e7e5"]);
    assert_eq!(state.exploring.move_index, 1);
    assert_eq!(s.analysis.last().unwrap(), "restart-exploring");
}

#[test]
fn go_to_move_round_trips_to_the_same_board() {
    let game = opera_game();
    let mut s = manual_session(&game);

    s.navigator.go_to_move(-1);
    let initial = s.navigator.snapshot().board;
    s.navigator.go_to_move(0);
    assert_ne!(s.navigator.snapshot().board, initial);
    s.navigator.go_to_move(-1);
    assert_eq!(s.navigator.snapshot().board, initial);
}

#[test]
fn preview_stage_freezes_the_snapshot() {
    let game = opera_game();
    let s = manual_session(&game);
    s.navigator.set_stage(Stage::Preview);
    let mut navigator = s.navigator;
    let before = navigator.snapshot();

    navigator.go_to_end();
    navigator.next_move();
    navigator.explore_line("e2e4", 0);
    navigator.make_manual_move(Square::E2, Square::E4);
    navigator.back_to_original_game();

    assert_eq!(navigator.snapshot(), before);
    assert!(s.analysis.calls().is_empty());
    assert!(s.sounds.calls().is_empty());
}

#[test]
fn manual_move_from_initial_position_opens_branch() {
    let game = opera_game();
    let mut s = manual_session(&game);

    s.navigator.make_manual_move(Square::E2, Square::E4);

    let state = s.navigator.snapshot();
    assert!(state.exploring.is_exploring_line);
    assert_eq!(state.exploring.moves, vec!["e2e4"]);
    assert_eq!(state.exploring.move_index, 0);
    assert_eq!(state.exploring.saved_game_move_index, -1);
}

#[test]
fn castling_move_produces_castle_cue() {
    let game = opera_game();
    let mut s = manual_session(&game);

    // Move 22 is 12. O-O-O
    s.navigator.go_to_move(22);
    assert_eq!(s.sounds.calls(), vec!["move c=false k=false o=true"]);
}

#[test]
fn capture_move_produces_capture_cue() {
    let game = opera_game();
    let mut s = manual_session(&game);

    // Move 6 is 4. dxe5
    s.navigator.go_to_move(6);
    assert_eq!(s.sounds.calls(), vec!["move c=true k=false o=false"]);
}
