//! SAN move resolution against a board, for replaying loaded games.

use chess::{Board, ChessMove, File, MoveGen, Piece, Rank, Square};

use crate::error::CoreError;

/// Find the legal move matching a SAN token on the given board.
pub fn resolve_san(board: &Board, san: &str) -> Result<ChessMove, CoreError> {
    let clean = san.trim_end_matches(|c: char| c == '+' || c == '#' || c == '!' || c == '?');

    let legal_moves: Vec<ChessMove> = MoveGen::new_legal(board).collect();

    if clean == "O-O" || clean == "0-0" {
        return resolve_castle(board, &legal_moves, true)
            .ok_or_else(|| CoreError::San(format!("No kingside castling move found for: {san}")));
    }
    if clean == "O-O-O" || clean == "0-0-0" {
        return resolve_castle(board, &legal_moves, false)
            .ok_or_else(|| CoreError::San(format!("No queenside castling move found for: {san}")));
    }

    // Parse piece, disambiguation, capture, destination, promotion
    let bytes = clean.as_bytes();
    if bytes.is_empty() {
        return Err(CoreError::San("Empty SAN move".to_string()));
    }

    let (piece, rest) = if bytes[0].is_ascii_uppercase() {
        let p = match bytes[0] {
            b'K' => Piece::King,
            b'Q' => Piece::Queen,
            b'R' => Piece::Rook,
            b'B' => Piece::Bishop,
            b'N' => Piece::Knight,
            _ => {
                return Err(CoreError::San(format!(
                    "Unknown piece: {}",
                    bytes[0] as char
                )))
            }
        };
        (p, &clean[1..])
    } else {
        (Piece::Pawn, clean)
    };

    // Extract promotion
    let (rest, promotion) = if let Some(eq_pos) = rest.find('=') {
        let promo_piece = match rest.as_bytes().get(eq_pos + 1) {
            Some(b'Q') => Some(Piece::Queen),
            Some(b'R') => Some(Piece::Rook),
            Some(b'B') => Some(Piece::Bishop),
            Some(b'N') => Some(Piece::Knight),
            _ => None,
        };
        (&rest[..eq_pos], promo_piece)
    } else {
        (rest, None)
    };

    // Remove captures marker
    let rest = rest.replace('x', "");

    // The last two characters should be the destination square
    let rest_bytes = rest.as_bytes();
    if rest_bytes.len() < 2 {
        return Err(CoreError::San(format!("SAN too short: {san}")));
    }

    let dest_file = rest_bytes[rest_bytes.len() - 2];
    let dest_rank = rest_bytes[rest_bytes.len() - 1];

    if !(b'a'..=b'h').contains(&dest_file) || !(b'1'..=b'8').contains(&dest_rank) {
        return Err(CoreError::San(format!("Invalid destination in SAN: {san}")));
    }

    let dest = Square::make_square(
        Rank::from_index((dest_rank - b'1') as usize),
        File::from_index((dest_file - b'a') as usize),
    );

    // Disambiguation (file and/or rank of the source square)
    let disambig = &rest[..rest.len() - 2];

    let mut candidates: Vec<ChessMove> = legal_moves
        .into_iter()
        .filter(|m| {
            m.get_dest() == dest
                && board.piece_on(m.get_source()) == Some(piece)
                && m.get_promotion() == promotion
        })
        .collect();

    if candidates.len() == 1 {
        return Ok(candidates[0]);
    }

    if !disambig.is_empty() {
        let disambig_bytes = disambig.as_bytes();
        candidates.retain(|m| {
            let src = m.get_source();
            for &b in disambig_bytes {
                if (b'a'..=b'h').contains(&b) {
                    if src.get_file().to_index() != (b - b'a') as usize {
                        return false;
                    }
                } else if (b'1'..=b'8').contains(&b)
                    && src.get_rank().to_index() != (b - b'1') as usize
                {
                    return false;
                }
            }
            true
        });
    }

    match candidates.len() {
        1 => Ok(candidates[0]),
        0 => Err(CoreError::San(format!("No legal move matches SAN: {san}"))),
        n => Err(CoreError::San(format!("Ambiguous SAN: {san} ({n} candidates)"))),
    }
}

/// Match a castling SAN to the king move two files towards the rook.
fn resolve_castle(board: &Board, legal_moves: &[ChessMove], kingside: bool) -> Option<ChessMove> {
    legal_moves.iter().copied().find(|m| {
        if board.piece_on(m.get_source()) != Some(Piece::King) {
            return false;
        }
        let src_file = m.get_source().get_file().to_index();
        let dst_file = m.get_dest().get_file().to_index();
        if kingside {
            dst_file > src_file && dst_file - src_file == 2
        } else {
            src_file > dst_file && src_file - dst_file == 2
        }
    })
}
