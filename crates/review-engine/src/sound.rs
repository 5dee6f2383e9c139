//! Move-sound cue derivation.

use chess::Piece;

use chess_core::position::PlayedMove;

use crate::trigger::SoundTrigger;

/// Cue attributes derived from recorded move metadata.
///
/// `check` stays false here: the position surface this engine consumes does
/// not expose check detection, and none is invented in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCue {
    pub capture: bool,
    pub check: bool,
    pub castle: bool,
}

/// Derive the cue for a recorded move. Castling is a king move spanning more
/// than one file.
pub fn cue_for(played: &PlayedMove) -> MoveCue {
    let file_delta = (played.from.get_file().to_index() as i32
        - played.to.get_file().to_index() as i32)
        .abs();
    MoveCue {
        capture: played.is_capture,
        check: false,
        castle: played.piece == Piece::King && file_delta > 1,
    }
}

/// Plays cues through a `SoundTrigger`, honoring the move-sounds setting.
/// With no move metadata (index -1), a generic move sound is used.
pub struct SoundPlayer<S> {
    trigger: S,
    enabled: bool,
}

impl<S: SoundTrigger> SoundPlayer<S> {
    pub fn new(trigger: S, enabled: bool) -> Self {
        Self { trigger, enabled }
    }

    pub fn play(&self, played: Option<&PlayedMove>) {
        if !self.enabled {
            return;
        }
        match played {
            Some(p) => {
                let cue = cue_for(p);
                self.trigger.play_move(cue.capture, cue.check, cue.castle);
            }
            None => self.trigger.play_generic_move(),
        }
    }
}
