//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("SAN error: {0}")]
    San(String),
}
