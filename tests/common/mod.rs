//! Shared fixtures for workspace-level integration tests.

use std::sync::{Arc, Mutex};

use chess_core::game_data::GameData;
use chess_core::pgn;
use chess_core::position::Position;
use review_engine::{AnalysisTrigger, Navigator, ReviewConfig, SoundTrigger, Stage};

/// Records every analysis request as a readable string.
#[derive(Clone, Default)]
pub struct RecordingAnalysis {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingAnalysis {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl AnalysisTrigger for RecordingAnalysis {
    fn analyze_position(&self, position: &Position) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("analyze {}", position.fen()));
    }

    fn restart_exploring_line(&self) {
        self.calls.lock().unwrap().push("restart-exploring".into());
    }

    fn restart_at_move(&self, index: i32) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("restart-at-move {index}"));
    }
}

/// Records every sound cue as a readable string.
#[derive(Clone, Default)]
pub struct RecordingSounds {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingSounds {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SoundTrigger for RecordingSounds {
    fn play_move(&self, is_capture: bool, is_check: bool, is_castle: bool) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("move c={is_capture} k={is_check} o={is_castle}"));
    }

    fn play_generic_move(&self) {
        self.calls.lock().unwrap().push("generic".into());
    }
}

/// The Opera Game, abridged. Castling (queenside), captures and a mate make
/// it a useful fixture for cue and navigation tests.
pub const OPERA_PGN: &str = r#"[Event "Paris Opera"]
[White "Morphy"]
[Black "Allies"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6
7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7
12. O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7
16. Qb8+ Nxb8 17. Rd8# 1-0"#;

pub fn opera_game() -> GameData {
    pgn::parse_pgn(OPERA_PGN).expect("fixture PGN parses")
}

pub struct Session {
    pub navigator: Navigator<RecordingAnalysis, RecordingSounds>,
    pub analysis: RecordingAnalysis,
    pub sounds: RecordingSounds,
}

/// A loaded game already advanced to Manual stage.
pub fn manual_session(game: &GameData) -> Session {
    let analysis = RecordingAnalysis::default();
    let sounds = RecordingSounds::default();
    let navigator = Navigator::new(
        game,
        &ReviewConfig::default(),
        analysis.clone(),
        sounds.clone(),
    )
    .expect("fixture game replays");
    navigator.set_stage(Stage::Manual);
    Session {
        navigator,
        analysis,
        sounds,
    }
}
