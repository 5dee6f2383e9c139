//! Integration tests: game loading and the channel-backed analysis trigger.

mod common;

use common::{opera_game, RecordingSounds};
use review_engine::trigger::ChannelAnalysisTrigger;
use review_engine::{AnalysisRequest, Navigator, ReviewConfig, Stage, Timeline};

#[test]
fn opera_game_loads_and_replays() {
    let game = opera_game();
    assert_eq!(game.metadata.white, "Morphy");
    assert_eq!(game.moves.len(), 33);
    assert_eq!(game.moves[0], "e4");
    assert_eq!(game.moves.last().map(String::as_str), Some("Rd8#"));

    let timeline = Timeline::from_game(&game).unwrap();
    assert_eq!(timeline.move_count(), 33);
    assert!(timeline.is_consistent());
    assert_eq!(timeline.move_at(22).unwrap().uci, "e1c1");
}

#[test]
fn corrupt_pgn_is_rejected_before_the_engine_sees_it() {
    assert!(chess_core::pgn::parse_pgn("[White \"X\"]\n\n*").is_none());
}

#[tokio::test]
async fn navigation_queues_token_fenced_analysis_jobs() {
    let (trigger, mut rx) = ChannelAnalysisTrigger::new();
    let mut navigator = Navigator::new(
        &opera_game(),
        &ReviewConfig::default(),
        trigger,
        RecordingSounds::default(),
    )
    .unwrap();
    navigator.set_stage(Stage::Manual);

    // A fast tap sequence; only the newest token should win downstream
    navigator.next_move();
    navigator.next_move();
    navigator.next_move();

    let mut jobs = Vec::new();
    while let Ok(job) = rx.try_recv() {
        jobs.push(job);
    }
    assert_eq!(jobs.len(), 3);
    assert!(jobs.windows(2).all(|w| w[0].token < w[1].token));
    assert_eq!(
        jobs.last().unwrap().request,
        AnalysisRequest::RestartAtMove { index: 2 }
    );

    // Supersession as the consumer applies it: keep only the newest
    let newest = jobs.iter().map(|j| j.token).max().unwrap();
    let applied: Vec<_> = jobs.iter().filter(|j| j.token == newest).collect();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].request, AnalysisRequest::RestartAtMove { index: 2 });

    // Wire shape seen by the backend
    let wire = serde_json::to_value(applied[0]).unwrap();
    assert_eq!(wire["kind"], "restart_at_move");
    assert_eq!(wire["index"], 2);
}

#[tokio::test]
async fn exploring_requests_are_full_resets() {
    let (trigger, mut rx) = ChannelAnalysisTrigger::new();
    let mut navigator = Navigator::new(
        &opera_game(),
        &ReviewConfig::default(),
        trigger,
        RecordingSounds::default(),
    )
    .unwrap();
    navigator.set_stage(Stage::Manual);

    navigator.explore_line("e2e4 e7e5", 0);
    navigator.next_move();

    let first = rx.try_recv().unwrap();
    let second = rx.try_recv().unwrap();
    assert_eq!(first.request, AnalysisRequest::RestartExploringLine);
    assert_eq!(second.request, AnalysisRequest::RestartExploringLine);
}
