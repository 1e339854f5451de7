//! Composition collections: the phrase being built, the finished score,
//! and the overflow pile of cards pushed out of the phrase.
//!
//! These are plain values owned by the caller (the UI layer). Nothing here
//! touches layout or rendering.

use crate::error::{CardError, Result};
use crate::model::Measure;
use crate::playback::{sequence_player_notes, PlayerNote};

/// Measures in a full phrase.
pub const PHRASE_LENGTH: usize = 4;

/// Phrases in a full score.
pub const SCORE_LENGTH: usize = 4;

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(CardError::IndexOutOfRange { index, len })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Phrase
// ═══════════════════════════════════════════════════════════════════════

/// Up to four measures played in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Phrase {
    measures: Vec<Measure>,
}

impl Phrase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    pub fn has_space(&self) -> bool {
        self.measures.len() < PHRASE_LENGTH
    }

    pub fn is_complete(&self) -> bool {
        self.measures.len() == PHRASE_LENGTH
    }

    pub fn push(&mut self, measure: Measure) -> Result<()> {
        if !self.has_space() {
            return Err(CardError::PhraseFull(PHRASE_LENGTH));
        }
        self.measures.push(measure);
        Ok(())
    }

    /// Put `measure` at `index`, returning the measure it displaced.
    pub fn replace(&mut self, index: usize, measure: Measure) -> Result<Measure> {
        check_index(index, self.measures.len())?;
        Ok(std::mem::replace(&mut self.measures[index], measure))
    }

    /// Move the measure at `from` so that it ends up at `to`.
    pub fn move_measure(&mut self, from: usize, to: usize) -> Result<()> {
        check_index(from, self.measures.len())?;
        check_index(to, self.measures.len())?;
        let measure = self.measures.remove(from);
        self.measures.insert(to, measure);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Measure> {
        check_index(index, self.measures.len())?;
        Ok(self.measures.remove(index))
    }

    /// Empty the phrase, handing back what it held.
    pub fn clear(&mut self) -> Vec<Measure> {
        std::mem::take(&mut self.measures)
    }

    /// Replace the whole phrase, handing back what it held.
    pub fn rewrite(&mut self, measures: Vec<Measure>) -> Result<Vec<Measure>> {
        if measures.len() > PHRASE_LENGTH {
            return Err(CardError::PhraseFull(PHRASE_LENGTH));
        }
        Ok(std::mem::replace(&mut self.measures, measures))
    }

    pub fn player_notes(&self) -> Vec<PlayerNote> {
        sequence_player_notes(&self.measures)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Score
// ═══════════════════════════════════════════════════════════════════════

/// Up to four saved phrases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Score {
    phrases: Vec<Vec<Measure>>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a copy of the phrase's current measures.
    pub fn add_phrase(&mut self, phrase: &Phrase) -> Result<()> {
        if self.phrases.len() >= SCORE_LENGTH {
            return Err(CardError::ScoreFull(SCORE_LENGTH));
        }
        self.phrases.push(phrase.measures().to_vec());
        Ok(())
    }

    pub fn remove_phrase(&mut self, index: usize) -> Result<Vec<Measure>> {
        check_index(index, self.phrases.len())?;
        Ok(self.phrases.remove(index))
    }

    pub fn phrase(&self, index: usize) -> Option<&[Measure]> {
        self.phrases.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn phrase_player_notes(&self, index: usize) -> Option<Vec<PlayerNote>> {
        self.phrase(index).map(sequence_player_notes)
    }

    /// Every phrase, in order, as one note sequence.
    pub fn player_notes(&self) -> Vec<PlayerNote> {
        self.phrases.iter().flat_map(|p| sequence_player_notes(p)).collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Overflow
// ═══════════════════════════════════════════════════════════════════════

/// Cards displaced from the phrase, most recent first, without repeats.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overflow {
    reserve: Vec<Measure>,
}

impl Overflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a measure at the front, moving it there if already present.
    pub fn add(&mut self, measure: Measure) {
        if let Some(index) = self.reserve.iter().position(|m| *m == measure) {
            self.reserve.remove(index);
        }
        self.reserve.insert(0, measure);
    }

    pub fn extend<I: IntoIterator<Item = Measure>>(&mut self, measures: I) {
        for measure in measures {
            self.add(measure);
        }
    }

    /// Take a measure out of the reserve. Returns whether it was there.
    pub fn remove(&mut self, measure: &Measure) -> bool {
        match self.reserve.iter().position(|m| m == measure) {
            Some(index) => {
                self.reserve.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn measures(&self) -> &[Measure] {
        &self.reserve
    }

    pub fn len(&self) -> usize {
        self.reserve.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserve.is_empty()
    }
}
