//! Engine error types
//!
//! Only construction can fail. Navigation misuse (boundary taps, illegal
//! drags, out-of-range indices) is silently refused, never an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Game replay error: {0}")]
    Replay(#[from] chess_core::error::CoreError),
}
