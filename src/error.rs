//! Error types shared by the codec, layout engine, and renderer.
//!
//! Every operation in this crate is pure, so an error always means the
//! input itself is unusable. Nothing here is retryable.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CardError {
    /// Duration letter other than `q`, `h` or `e`.
    #[error("not a valid duration: '{letter}' at position {position}")]
    InvalidDuration { letter: char, position: usize },

    /// Pitch outside the nine-position staff ladder.
    #[error("not a valid staff position: '{digit}' at position {position}")]
    InvalidPitch { digit: char, position: usize },

    /// Staff position above the top line.
    #[error("staff position {0} is off the staff")]
    PitchOutOfRange(u8),

    /// Code whose length is not a whole number of two-character notes.
    #[error("measure code has odd length {len}")]
    TruncatedCode { len: usize },

    /// Orientation code outside 1–4.
    #[error("not a valid orientation: '{0}'")]
    InvalidOrientation(char),

    /// Card number that is not three digits followed by an orientation.
    #[error("not a valid card number: '{0}'")]
    InvalidCardNumber(String),

    /// Card id missing from the deck.
    #[error("no card '{0}' in deck")]
    UnknownCard(String),

    /// Deck catalog that could not be loaded.
    #[error("invalid deck: {0}")]
    InvalidDeck(String),

    /// Measure whose notes do not add up to four beats.
    #[error("measure spans {beats} beats, expected 4")]
    MalformedMeasure { beats: f64 },

    /// Eighth note without an eighth-note partner in the same beat.
    #[error("eighth note at index {index} is not paired with a following eighth")]
    UnpairedEighth { index: usize },

    /// Card dimensions that cannot hold a layout.
    #[error("invalid card size {width}x{height}")]
    InvalidCardSize { width: f64, height: f64 },

    /// Configuration that could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("phrase already holds {0} measures")]
    PhraseFull(usize),

    #[error("score already holds {0} phrases")]
    ScoreFull(usize),

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CardError>;
