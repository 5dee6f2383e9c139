//! Board position surface consumed by the review engine.
//!
//! `Position` is a thin Copy wrapper over `chess::Board`: rule legality and
//! move application belong to the `chess` crate, the engine only works on
//! fresh copies and stores them back into a timeline.

use std::str::FromStr;

use chess::{Board, ChessMove, Color, File, Piece, Rank, Square};

use crate::error::CoreError;
use crate::san;

/// Metadata for a move recorded in a timeline, kept next to the position it
/// produced. Enough for sound cues and for rebuilding a UCI move list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub uci: String,
    pub piece: Piece,
    pub is_capture: bool,
    pub from: Square,
    pub to: Square,
}

/// A copyable board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    board: Board,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            board: Board::default(),
        }
    }
}

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, CoreError> {
        let board =
            Board::from_str(fen).map_err(|_| CoreError::InvalidFen(fen.to_string()))?;
        Ok(Self { board })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.board.piece_on(square)
    }

    /// Whether `from -> to` is playable here. A pawn push to the back rank is
    /// only legal with a promotion piece attached, so that form is checked too.
    pub fn is_legal_move(&self, from: Square, to: Square) -> bool {
        self.board.legal(ChessMove::new(from, to, None))
            || self.board.legal(ChessMove::new(from, to, Some(Piece::Queen)))
    }

    /// Whether `from -> to` would be a pawn promotion.
    pub fn needs_promotion(&self, from: Square, to: Square) -> bool {
        self.board.piece_on(from) == Some(Piece::Pawn)
            && (to.get_rank() == Rank::Eighth || to.get_rank() == Rank::First)
    }

    /// Apply a move if legal. Returns the recorded move on success, None on
    /// an illegal move (the position is left unchanged).
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Option<PlayedMove> {
        self.apply(ChessMove::new(from, to, promotion))
    }

    /// Apply a UCI token ("e2e4", "e7e8q") if well-formed and legal.
    pub fn apply_uci(&mut self, token: &str) -> Option<PlayedMove> {
        self.apply(parse_uci(token)?)
    }

    /// Apply a SAN token ("Nf3", "exd5", "O-O") against this position.
    pub fn apply_san(&mut self, token: &str) -> Result<PlayedMove, CoreError> {
        let mv = san::resolve_san(&self.board, token)?;
        self.apply(mv)
            .ok_or_else(|| CoreError::San(format!("Resolved SAN is not legal: {token}")))
    }

    fn apply(&mut self, mv: ChessMove) -> Option<PlayedMove> {
        if !self.board.legal(mv) {
            return None;
        }
        let played = self.describe(mv);
        self.board = self.board.make_move_new(mv);
        Some(played)
    }

    /// Record metadata for a legal move about to be played on this position.
    fn describe(&self, mv: ChessMove) -> PlayedMove {
        let from = mv.get_source();
        let to = mv.get_dest();
        // A legal move always has a piece on its source square
        let piece = self.board.piece_on(from).unwrap_or(Piece::Pawn);
        // Diagonal pawn move to an empty square is an en passant capture
        let is_capture = self.board.piece_on(to).is_some()
            || (piece == Piece::Pawn && from.get_file() != to.get_file());
        PlayedMove {
            uci: uci_string(mv),
            piece,
            is_capture,
            from,
            to,
        }
    }
}

/// Format a move in UCI notation (from square, to square, promotion letter).
pub fn uci_string(mv: ChessMove) -> String {
    format!(
        "{}{}{}",
        mv.get_source(),
        mv.get_dest(),
        mv.get_promotion()
            .map(|p| match p {
                Piece::Queen => "q",
                Piece::Rook => "r",
                Piece::Bishop => "b",
                Piece::Knight => "n",
                _ => "",
            })
            .unwrap_or("")
    )
}

/// Parse a UCI move token. Returns None for malformed tokens; legality is the
/// board's business, not the parser's.
pub fn parse_uci(token: &str) -> Option<ChessMove> {
    let bytes = token.as_bytes();
    if !(4..=5).contains(&bytes.len()) {
        return None;
    }

    let from = square_from_bytes(bytes[0], bytes[1])?;
    let to = square_from_bytes(bytes[2], bytes[3])?;

    let promotion = match bytes.get(4) {
        None => None,
        Some(b'q') | Some(b'Q') => Some(Piece::Queen),
        Some(b'r') | Some(b'R') => Some(Piece::Rook),
        Some(b'b') | Some(b'B') => Some(Piece::Bishop),
        Some(b'n') | Some(b'N') => Some(Piece::Knight),
        Some(_) => return None,
    };

    Some(ChessMove::new(from, to, promotion))
}

fn square_from_bytes(file: u8, rank: u8) -> Option<Square> {
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(Square::make_square(
        Rank::from_index((rank - b'1') as usize),
        File::from_index((file - b'a') as usize),
    ))
}
