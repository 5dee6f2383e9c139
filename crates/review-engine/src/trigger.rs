//! Analysis and sound trigger seams.
//!
//! The engine fires requests and never awaits results. Supersession, not
//! cancellation: every queued job carries a monotonically increasing token,
//! and the consuming side must drop any result whose token is older than the
//! newest one it has seen for the same branch.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use chess_core::position::Position;

/// A single fire-and-forget analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisRequest {
    /// Evaluate one position, keyed by FEN.
    Position { fen: String },
    /// Throw away exploring-line results and start over on the current line.
    RestartExploringLine,
    /// Restart incremental analysis keyed to a main-game move index.
    RestartAtMove { index: i32 },
}

/// Where navigation sends its analysis requests.
pub trait AnalysisTrigger {
    fn analyze_position(&self, position: &Position);
    fn restart_exploring_line(&self);
    fn restart_at_move(&self, index: i32);
}

/// Where navigation sends its audio cues.
pub trait SoundTrigger {
    fn play_move(&self, is_capture: bool, is_check: bool, is_castle: bool);
    fn play_generic_move(&self);
}

/// A request as it travels to the analysis backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisJob {
    pub token: u64,
    #[serde(flatten)]
    pub request: AnalysisRequest,
}

/// Production trigger: pushes token-fenced jobs into an unbounded channel.
/// `send` never blocks, so navigation stays responsive while analysis of an
/// earlier position is still in flight.
pub struct ChannelAnalysisTrigger {
    tx: mpsc::UnboundedSender<AnalysisJob>,
    next_token: AtomicU64,
}

impl ChannelAnalysisTrigger {
    /// Create the trigger and the receiving end the analysis backend drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AnalysisJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                next_token: AtomicU64::new(0),
            },
            rx,
        )
    }

    fn send(&self, request: AnalysisRequest) {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        // A closed receiver means analysis has shut down; navigation keeps working
        let _ = self.tx.send(AnalysisJob { token, request });
        debug!(token, "analysis request queued");
    }
}

impl AnalysisTrigger for ChannelAnalysisTrigger {
    fn analyze_position(&self, position: &Position) {
        self.send(AnalysisRequest::Position {
            fen: position.fen(),
        });
    }

    fn restart_exploring_line(&self) {
        self.send(AnalysisRequest::RestartExploringLine);
    }

    fn restart_at_move(&self, index: i32) {
        self.send(AnalysisRequest::RestartAtMove { index });
    }
}
