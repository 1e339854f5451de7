//! Measure codes: the compact text form of a card measure.
//!
//! Each note is two characters: a staff position digit `0`–`8` followed by
//! a duration letter (`q`, `h`, `e`). `"5h4q4e1e"` is a half note on C5,
//! a quarter on B4, then two eighths on B4 and F4.

use crate::error::{CardError, Result};
use crate::model::{Duration, Measure, Note, STAFF_POSITIONS};

/// Characters per encoded note.
pub const NOTE_CODE_LENGTH: usize = 2;

/// Parse a measure code.
///
/// The total length of the measure is not checked here; see
/// [`Measure::validate`].
pub fn decode(code: &str) -> Result<Measure> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() % NOTE_CODE_LENGTH != 0 {
        return Err(CardError::TruncatedCode { len: chars.len() });
    }

    let mut notes = Vec::with_capacity(chars.len() / NOTE_CODE_LENGTH);
    for (i, pair) in chars.chunks(NOTE_CODE_LENGTH).enumerate() {
        let position = i * NOTE_CODE_LENGTH;
        let (digit, letter) = (pair[0], pair[1]);

        let pitch = match digit.to_digit(10) {
            Some(d) if d < STAFF_POSITIONS as u32 => d as u8,
            _ => return Err(CardError::InvalidPitch { digit, position }),
        };
        let duration = Duration::from_code(letter).ok_or(CardError::InvalidDuration {
            letter,
            position: position + 1,
        })?;

        notes.push(Note::new(pitch, duration)?);
    }

    Ok(Measure::new(notes))
}

/// Write a measure back out as a code. Inverse of [`decode`].
pub fn encode(measure: &Measure) -> String {
    let mut code = String::with_capacity(measure.len() * NOTE_CODE_LENGTH);
    for note in measure.notes() {
        code.push(char::from(b'0' + note.pitch()));
        code.push(note.duration().code());
    }
    code
}

/// Horizontal flip: the same notes, last first.
pub fn reverse_time(measure: &Measure) -> Measure {
    Measure::new(measure.notes().iter().rev().copied().collect())
}

/// Vertical flip: every pitch mirrored around the middle staff line.
pub fn invert_pitch(measure: &Measure) -> Measure {
    Measure::new(measure.notes().iter().map(Note::inverted).collect())
}
