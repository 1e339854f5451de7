//! Player notes: what an external synth needs to play a measure.
//!
//! Playback skips layout entirely. Each note becomes an absolute pitch
//! name in the card scale plus a duration name, handed over unmodified:
//!   `{"pitch": "C5", "duration": "half"}`

use serde::Serialize;

use crate::model::{Duration, Measure, Note};

/// A note as the playback library consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerNote {
    /// Pitch name, e.g. `"E4"`.
    pub pitch: &'static str,
    pub duration: Duration,
}

impl From<&Note> for PlayerNote {
    fn from(note: &Note) -> Self {
        Self {
            pitch: note.pitch_name(),
            duration: note.duration(),
        }
    }
}

pub fn player_notes(measure: &Measure) -> Vec<PlayerNote> {
    measure.notes().iter().map(PlayerNote::from).collect()
}

/// Player notes for measures played back to back (a phrase or a score).
pub fn sequence_player_notes(measures: &[Measure]) -> Vec<PlayerNote> {
    measures.iter().flat_map(player_notes).collect()
}

/// Serialize player notes to JSON.
pub fn player_notes_to_json(notes: &[PlayerNote]) -> String {
    serde_json::to_string(notes).unwrap_or_else(|_| "[]".to_string())
}
