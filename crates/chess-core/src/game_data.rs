use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub white: String,
    pub black: String,
    pub result: String, // "1-0", "0-1", "1/2-1/2"
    pub date: Option<String>,
    pub time_control: Option<String>,
    pub eco: Option<String>,
    pub event: Option<String>,
    pub link: Option<String>,
}

impl Default for GameMetadata {
    fn default() -> Self {
        Self {
            white: "Unknown".to_string(),
            black: "Unknown".to_string(),
            result: "*".to_string(),
            date: None,
            time_control: None,
            eco: None,
            event: None,
            link: None,
        }
    }
}

/// A loaded game as handed to the review engine: headers plus the SAN move
/// list the main timeline is replayed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub metadata: GameMetadata,
    pub moves: Vec<String>, // SAN notation
    pub pgn: String,
}

impl GameData {
    /// Build a game directly from SAN tokens, without PGN headers.
    pub fn from_san_moves(moves: &[&str]) -> Self {
        Self {
            metadata: GameMetadata::default(),
            moves: moves.iter().map(|s| s.to_string()).collect(),
            pgn: String::new(),
        }
    }
}
