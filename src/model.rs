//! Data model for a single card measure.
//!
//! A measure is a short run of notes on a nine-position staff ladder
//! (lines and spaces of one treble staff, E4 up to F5) in a fixed C major
//! scale and 4/4 time.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::codec;
use crate::error::{CardError, Result};

/// Number of positions on the staff ladder (5 lines + 4 spaces).
pub const STAFF_POSITIONS: u8 = 9;

/// Middle line of the staff. Stems flip direction here.
pub const STAFF_CENTER: u8 = 4;

/// Every measure is exactly four quarter-note beats.
pub const BEATS_PER_MEASURE: u32 = 4;

/// Length of a complete measure in eighth-note units.
pub const EIGHTHS_PER_MEASURE: u32 = BEATS_PER_MEASURE * 2;

/// Pitch names for each staff position, bottom line first.
pub const SCALE: [&str; STAFF_POSITIONS as usize] =
    ["E4", "F4", "G4", "A4", "B4", "C5", "D5", "E5", "F5"];

/// MIDI key numbers matching [`SCALE`].
const MIDI_KEYS: [u8; STAFF_POSITIONS as usize] = [64, 65, 67, 69, 71, 72, 74, 76, 77];

/// Note length. Only the three values the cards use are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Duration {
    Quarter,
    Half,
    Eighth,
}

impl Duration {
    /// Parse a duration letter from a measure code.
    pub fn from_code(letter: char) -> Option<Self> {
        match letter {
            'q' => Some(Duration::Quarter),
            'h' => Some(Duration::Half),
            'e' => Some(Duration::Eighth),
            _ => None,
        }
    }

    /// The letter used in measure codes.
    pub fn code(self) -> char {
        match self {
            Duration::Quarter => 'q',
            Duration::Half => 'h',
            Duration::Eighth => 'e',
        }
    }

    /// Length in eighth-note units.
    pub fn eighths(self) -> u32 {
        match self {
            Duration::Quarter => 2,
            Duration::Half => 4,
            Duration::Eighth => 1,
        }
    }

    /// Length in quarter-note beats.
    pub fn beats(self) -> f64 {
        self.eighths() as f64 / 2.0
    }

    pub fn name(self) -> &'static str {
        match self {
            Duration::Quarter => "quarter",
            Duration::Half => "half",
            Duration::Eighth => "eighth",
        }
    }
}

/// A single pitched note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Note {
    pitch: u8,
    duration: Duration,
}

impl Note {
    /// Create a note, rejecting positions off the staff ladder.
    pub fn new(pitch: u8, duration: Duration) -> Result<Self> {
        if pitch >= STAFF_POSITIONS {
            return Err(CardError::PitchOutOfRange(pitch));
        }
        Ok(Self { pitch, duration })
    }

    /// Staff position, 0 = bottom line, 8 = top line.
    pub fn pitch(&self) -> u8 {
        self.pitch
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Absolute pitch name in the card scale, e.g. `"C5"`.
    pub fn pitch_name(&self) -> &'static str {
        SCALE[self.pitch as usize]
    }

    pub fn midi_key(&self) -> u8 {
        MIDI_KEYS[self.pitch as usize]
    }

    /// The same note mirrored around the middle line.
    pub fn inverted(&self) -> Self {
        Self {
            pitch: STAFF_POSITIONS - 1 - self.pitch,
            duration: self.duration,
        }
    }
}

/// One bar of 4/4 music. Never mutated; transforms build a new measure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Measure {
    notes: Vec<Note>,
}

impl Measure {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total length in eighth-note units.
    pub fn total_eighths(&self) -> u32 {
        self.notes.iter().map(|n| n.duration.eighths()).sum()
    }

    /// Total length in quarter-note beats.
    pub fn beats(&self) -> f64 {
        self.total_eighths() as f64 / 2.0
    }

    /// Check that the measure fills exactly four beats and that every
    /// eighth note shares its beat with a second eighth.
    pub fn validate(&self) -> Result<()> {
        let mut i = 0;
        while i < self.notes.len() {
            if self.notes[i].duration == Duration::Eighth {
                match self.notes.get(i + 1) {
                    Some(next) if next.duration == Duration::Eighth => i += 2,
                    _ => return Err(CardError::UnpairedEighth { index: i }),
                }
            } else {
                i += 1;
            }
        }

        if self.total_eighths() != EIGHTHS_PER_MEASURE {
            return Err(CardError::MalformedMeasure { beats: self.beats() });
        }
        Ok(())
    }

    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(self))
    }
}

impl FromStr for Measure {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        codec::decode(s)
    }
}
